use nomikai_domain::{
    AllocationEngine, Attendance, Event, EventValidator, Gender, Money, MultiplierConfig,
    Participant, ParticipantId, Role, SummaryAggregator, Venue, VenueId,
};
use proptest::prelude::*;

const GENDERS: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Unspecified];
const ROLES: [Role; 3] = [Role::Senior, Role::Junior, Role::Flat];

/// Builds `participant_count` attendees plus one trailing participant who attended nothing.
/// The first participant attends every venue so no venue is left without attendees.
fn build_event(
    participant_count: usize,
    venue_count: usize,
    costs: &[i64],
    attendance: &[f64],
    genders: &[usize],
    roles: &[usize],
    payer_indexes: &[usize],
) -> Event {
    let mut participants: Vec<Participant> = (0..participant_count)
        .map(|idx| {
            let mut slots = [0.0; 3];
            for (slot, rate) in slots.iter_mut().enumerate() {
                *rate = attendance[idx * 3 + slot];
                if idx == 0 && *rate == 0.0 {
                    *rate = 1.0;
                }
            }
            Participant {
                id: ParticipantId(idx as u64 + 1),
                nickname: format!("member{idx}"),
                gender: GENDERS[genders[idx] % GENDERS.len()],
                role: ROLES[roles[idx] % ROLES.len()],
                attendance: Attendance::new(slots),
            }
        })
        .collect();
    participants.push(Participant {
        id: ParticipantId(100),
        nickname: "absent".to_string(),
        gender: Gender::Male,
        role: Role::Senior,
        attendance: Attendance::absent(),
    });

    let venues = (0..venue_count)
        .map(|idx| {
            let payer = &participants[payer_indexes[idx] % participants.len()];
            Venue {
                id: VenueId(idx as u64 + 1),
                order: idx as u32 + 1,
                total_cost: Money::from_i64(costs[idx]),
                payer: payer.id,
            }
        })
        .collect();

    Event {
        participants,
        venues,
    }
}

fn build_config(multipliers: &[f64]) -> MultiplierConfig {
    MultiplierConfig::new()
        .with_gender(Gender::Male, multipliers[0])
        .with_gender(Gender::Female, multipliers[1])
        .with_role(Role::Senior, multipliers[2])
        .with_role(Role::Junior, multipliers[3])
}

proptest! {
    #[test]
    fn totals_conserve_venue_costs(
        participant_count in 1usize..=6,
        venue_count in 1usize..=3,
        costs in prop::collection::vec(0i64..=200_000, 3),
        attendance in prop::collection::vec(prop::sample::select(vec![0.0, 0.25, 0.5, 0.75, 1.0]), 18),
        genders in prop::collection::vec(0usize..3, 6),
        roles in prop::collection::vec(0usize..3, 6),
        payer_indexes in prop::collection::vec(0usize..7, 3),
        multipliers in prop::collection::vec(0.5f64..2.0, 4),
    ) {
        let event = build_event(
            participant_count,
            venue_count,
            &costs,
            &attendance,
            &genders,
            &roles,
            &payer_indexes,
        );
        let config = build_config(&multipliers);
        prop_assert!(EventValidator::validate(&event, &config).is_ok());

        let allocations = AllocationEngine.allocate(&event, &config).expect("allocation");
        let balances = SummaryAggregator.summarize(&event, &allocations).expect("summary");

        let total_cost = event.total_cost().expect("total cost").amount();
        let tolerance = event.participants.len() as i64 - 1;
        let paid: i64 = balances.iter().map(|balance| balance.total_paid.amount()).sum();
        let owed: i64 = balances.iter().map(|balance| balance.total_owed.amount()).sum();
        let net: i64 = balances.iter().map(|balance| balance.balance.amount()).sum();

        prop_assert_eq!(paid, total_cost);
        prop_assert!((owed - total_cost).abs() <= tolerance);
        prop_assert!(net.abs() <= tolerance);

        let absent = allocations.last().expect("absent participant");
        let absent_attendance = event.participants.last().expect("absent participant").attendance;
        prop_assert!(absent_attendance.is_absent_everywhere());
        prop_assert!(absent.breakdown.is_empty());
        prop_assert_eq!(absent.total_owed, Money::ZERO);
    }

    #[test]
    fn allocation_is_repeatable(
        participant_count in 1usize..=6,
        costs in prop::collection::vec(0i64..=50_000, 3),
        attendance in prop::collection::vec(prop::sample::select(vec![0.0, 0.3, 0.5, 1.0]), 18),
        genders in prop::collection::vec(0usize..3, 6),
        roles in prop::collection::vec(0usize..3, 6),
        multipliers in prop::collection::vec(0.5f64..2.0, 4),
    ) {
        let event = build_event(
            participant_count,
            3,
            &costs,
            &attendance,
            &genders,
            &roles,
            &[0, 1, 2],
        );
        let config = build_config(&multipliers);

        let first = AllocationEngine.allocate(&event, &config).expect("allocation");
        let second = AllocationEngine.allocate(&event, &config).expect("allocation");

        prop_assert_eq!(first, second);
    }
}
