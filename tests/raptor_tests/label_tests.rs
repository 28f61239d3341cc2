use concourse::raptor::label::{ParetoLabel, ParetoSet};
use concourse::shared::Timestamp;

fn ts(secs: i64) -> Timestamp {
    Timestamp::from_unix(secs)
}

#[test]
fn strictly_better_on_one_axis_dominates() {
    let earlier_same_legs = ParetoLabel::new(ts(100), 1);
    let later_same_legs = ParetoLabel::new(ts(200), 1);
    assert!(earlier_same_legs.dominates(&later_same_legs));
    assert!(!later_same_legs.dominates(&earlier_same_legs));
}

#[test]
fn incomparable_labels_do_not_dominate() {
    let fewer_legs_later = ParetoLabel::new(ts(200), 1);
    let more_legs_earlier = ParetoLabel::new(ts(100), 2);
    assert!(!fewer_legs_later.dominates(&more_legs_earlier));
    assert!(!more_legs_earlier.dominates(&fewer_legs_later));
}

#[test]
fn dominated_insert_is_rejected_and_set_stays_minimal() {
    let mut set = ParetoSet::default();
    set.try_insert(ParetoLabel::new(ts(100), 1)).expect("first insert always succeeds");
    let rejected = set.try_insert(ParetoLabel::new(ts(200), 1));
    assert!(rejected.is_none());
    assert_eq!(set.iter().count(), 1);
}

#[test]
fn better_insert_evicts_dominated_entry() {
    let mut set = ParetoSet::default();
    set.try_insert(ParetoLabel::new(ts(200), 1)).expect("first insert always succeeds");
    let accepted = set.try_insert(ParetoLabel::new(ts(100), 1));
    assert!(accepted.is_some());
    let remaining: Vec<_> = set.iter().collect();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].0.arrival, ts(100));
}

#[test]
fn incomparable_labels_coexist() {
    let mut set = ParetoSet::default();
    set.try_insert(ParetoLabel::new(ts(200), 1)).expect("first insert always succeeds");
    let second = set.try_insert(ParetoLabel::new(ts(100), 2));
    assert!(second.is_some());
    assert_eq!(set.iter().count(), 2);
}
