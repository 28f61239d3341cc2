use concourse::raptor::{
    itinerary::{Segment, reconstruct},
    label::ParetoLabel,
    path::{PathPointer, WALK_SPEED_MPS},
    state::RoundState,
};
use concourse::shared::Timestamp;

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix(secs)
}

#[test]
fn reconstructs_single_ride_leg() {
    let mut state = RoundState::new();
    state.insert(&"A".into(), ParetoLabel::new(ts(0), 0), PathPointer::Origin);

    let label = ParetoLabel::new(ts(600), 1);
    let id = state
        .insert(
            &"B".into(),
            label,
            PathPointer::Ride {
                prev_stop: "A".into(),
                prev_label: 0,
                route_id: "r1".into(),
                vehicle_id: "v1".into(),
                board_time: ts(0),
                alight_time: ts(600),
            },
        )
        .expect("first label at B always succeeds");

    let itinerary = reconstruct(&state, &"A".into(), &"B".into(), label, id);

    assert_eq!(itinerary.legs, 1);
    assert_eq!(itinerary.departure, ts(0));
    assert_eq!(itinerary.arrival, ts(600));
    assert_eq!(itinerary.segments.len(), 1);
    match &itinerary.segments[0] {
        Segment::Ride { from, to, route_id, vehicle_id, board, alight } => {
            assert_eq!(&**from, "A");
            assert_eq!(&**to, "B");
            assert_eq!(&**route_id, "r1");
            assert_eq!(&**vehicle_id, "v1");
            assert_eq!(*board, ts(0));
            assert_eq!(*alight, ts(600));
        }
        other => panic!("expected a ride segment, got {other:?}"),
    }
}

#[test]
fn merges_two_adjacent_walks() {
    let mut state = RoundState::new();
    state.insert(&"A".into(), ParetoLabel::new(ts(0), 0), PathPointer::Origin);

    let id_b = state
        .insert(
            &"B".into(),
            ParetoLabel::new(ts(100), 0),
            PathPointer::Walk { prev_stop: "A".into(), prev_label: 0, seconds: 100 },
        )
        .expect("first label at B always succeeds");

    let label_c = ParetoLabel::new(ts(250), 0);
    let id_c = state
        .insert(
            &"C".into(),
            label_c,
            PathPointer::Walk { prev_stop: "B".into(), prev_label: id_b, seconds: 150 },
        )
        .expect("first label at C always succeeds");

    let itinerary = reconstruct(&state, &"A".into(), &"C".into(), label_c, id_c);

    assert_eq!(itinerary.departure, ts(0));
    assert_eq!(itinerary.arrival, ts(250));
    assert_eq!(itinerary.segments.len(), 1);
    match &itinerary.segments[0] {
        Segment::Walk { from, to, depart, arrive, distance_meters } => {
            assert_eq!(&**from, "A");
            assert_eq!(&**to, "C");
            assert_eq!(*depart, ts(0));
            assert_eq!(*arrive, ts(250));
            assert_eq!(*distance_meters, 250.0 * WALK_SPEED_MPS);
        }
        other => panic!("expected a merged walk segment, got {other:?}"),
    }
}
