/// Balance of each person (positive: is owed money, negative: owes money)
/// The unit is an integer (e.g., yen)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PersonBalance<'a> {
    pub name: &'a str,
    pub balance: i64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payment<'a> {
    pub from: &'a str,
    pub to: &'a str,
    pub amount: i64,
}
