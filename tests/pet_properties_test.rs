//! Invariants of the pet model under arbitrary action sequences and elapsed time.

use chrono::{DateTime, TimeDelta, Utc};
use proptest::prelude::*;

use tomodachi::pet::rules::MAX_NEGLECT_DAYS;
use tomodachi::{Keeper, ManualClock, Meter, Outcome, Pet, PetSnapshot, Rules, TomodachiConfig};

fn t0() -> DateTime<Utc> {
    DateTime::UNIX_EPOCH + TimeDelta::days(19_500)
}

#[derive(Debug, Clone)]
enum Op {
    Feed(u32),
    Play(u32),
    Sleep(u32),
    Wait(i64),
    Status,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u32..200).prop_map(Op::Feed),
        (0u32..600).prop_map(Op::Play),
        (0u32..48).prop_map(Op::Sleep),
        // up to a week, in minutes
        (0i64..10_080).prop_map(Op::Wait),
        Just(Op::Status),
    ]
}

fn in_range(m: Meter) -> bool {
    (Meter::MIN..=Meter::MAX).contains(&m.value())
}

proptest! {
    #[test]
    fn meters_stay_in_range(ops in proptest::collection::vec(arb_op(), 1..200)) {
        let rules = Rules::default();
        let mut now = t0();
        let mut pet = Pet::new("Prop", now);

        for op in ops {
            match op {
                Op::Feed(n) => { pet.feed(n, now, &rules); }
                Op::Play(n) => { pet.play(n, now, &rules); }
                Op::Sleep(n) => { pet.sleep(n, now, &rules); }
                Op::Wait(mins) => now += TimeDelta::minutes(mins),
                Op::Status => { pet.status(now, &rules); }
            }
            let s = pet.snapshot();
            prop_assert!(in_range(s.hunger), "hunger out of range: {:?}", s.hunger);
            prop_assert!(in_range(s.happiness), "happiness out of range: {:?}", s.happiness);
            prop_assert!(in_range(s.energy), "energy out of range: {:?}", s.energy);
            prop_assert!(in_range(s.care), "care out of range: {:?}", s.care);
        }
    }

    #[test]
    fn decay_is_monotonic(
        start_hunger in 0.0f64..=100.0,
        start_energy in 0.0f64..=100.0,
        start_happiness in 0.0f64..=100.0,
        first in 0i64..5_000,
        extra in 0i64..5_000,
    ) {
        let rules = Rules::default();
        let mut snapshot = Pet::new("Mono", t0()).snapshot();
        snapshot.hunger = Meter::new(start_hunger);
        snapshot.energy = Meter::new(start_energy);
        snapshot.happiness = Meter::new(start_happiness);
        let mut pet = Pet::restore(snapshot).expect("valid snapshot");

        let a = pet.status(t0() + TimeDelta::minutes(first), &rules);
        let b = pet.status(t0() + TimeDelta::minutes(first + extra), &rules);

        prop_assert!(b.hunger >= a.hunger, "hunger fell: {:?} -> {:?}", a.hunger, b.hunger);
        prop_assert!(b.energy <= a.energy, "energy rose: {:?} -> {:?}", a.energy, b.energy);
        prop_assert!(b.happiness <= a.happiness);
        prop_assert!(b.age_ms >= a.age_ms);
    }

    #[test]
    fn read_frequency_does_not_change_decay(
        start_hunger in 0.0f64..=100.0,
        start_energy in 0.0f64..=100.0,
        start_happiness in 0.0f64..=100.0,
        start_care in 0.0f64..=100.0,
        total_secs in 1i64..400_000,
        reads in 1i64..300,
    ) {
        let rules = Rules::default();
        let mut snapshot = Pet::new("Gran", t0()).snapshot();
        snapshot.hunger = Meter::new(start_hunger);
        snapshot.energy = Meter::new(start_energy);
        snapshot.happiness = Meter::new(start_happiness);
        snapshot.care = Meter::new(start_care);
        let mut once = Pet::restore(snapshot).expect("valid snapshot");
        let mut often = once.clone();

        let end = t0() + TimeDelta::seconds(total_secs);
        let step = (total_secs / reads).max(1);
        let mut at = step;
        while at < total_secs {
            often.refresh(t0() + TimeDelta::seconds(at), &rules);
            at += step;
        }

        let single = once.status(end, &rules);
        let polled = often.status(end, &rules);
        assert_close(&single, &polled)?;
    }

    #[test]
    fn status_is_idempotent(ops in proptest::collection::vec(arb_op(), 0..50)) {
        let rules = Rules::default();
        let mut now = t0();
        let mut pet = Pet::new("Idem", now);
        for op in ops {
            match op {
                Op::Feed(n) => { pet.feed(n, now, &rules); }
                Op::Play(n) => { pet.play(n, now, &rules); }
                Op::Sleep(n) => { pet.sleep(n, now, &rules); }
                Op::Wait(mins) => now += TimeDelta::minutes(mins),
                Op::Status => {}
            }
        }
        let first = pet.status(now, &rules);
        let second = pet.status(now, &rules);
        prop_assert_eq!(first, second);
    }
}

fn assert_close(a: &PetSnapshot, b: &PetSnapshot) -> Result<(), TestCaseError> {
    const EPSILON: f64 = 1e-6;
    for (name, x, y) in [
        ("hunger", a.hunger, b.hunger),
        ("energy", a.energy, b.energy),
        ("happiness", a.happiness, b.happiness),
    ] {
        prop_assert!(
            (x.value() - y.value()).abs() < EPSILON,
            "{} differs: {} vs {}",
            name,
            x.value(),
            y.value()
        );
    }
    prop_assert_eq!(a.age_ms, b.age_ms);
    prop_assert_eq!(a.alive, b.alive);
    Ok(())
}

#[test]
fn longest_allowed_neglect_window_fits_the_calendar() {
    let config = TomodachiConfig::from_toml(&format!(
        "[rules]\nmin_neglect_days = {MAX_NEGLECT_DAYS:.1}\nmax_neglect_days = {MAX_NEGLECT_DAYS:.1}\n"
    ))
    .expect("ceiling itself is allowed");

    let clock = ManualClock::new(t0());
    let mut keeper = Keeper::new("Ancient", clock, config.rules, "pet.json");
    keeper.clock().advance(TimeDelta::minutes(1));
    assert!(keeper.status().alive);

    keeper.clock().advance(TimeDelta::days(365 * 900));
    assert!(keeper.status().alive);
}

#[test]
fn neglect_window_beyond_the_ceiling_is_rejected() {
    assert!(TomodachiConfig::from_toml("[rules]\nmax_neglect_days = 1e9\n").is_err());
}

#[test]
fn new_pet_has_documented_defaults() {
    let mut keeper = Keeper::new("Tomo", ManualClock::new(t0()), Rules::default(), "pet.json");
    let s = keeper.status();
    assert_eq!(s.name, "Tomo");
    assert_eq!(s.hunger.value(), 50.0);
    assert_eq!(s.happiness.value(), 50.0);
    assert_eq!(s.energy.value(), 50.0);
    assert_eq!(s.age_ms, 0);
    assert!(s.alive);
}

#[test]
fn feeding_a_starving_pet_lowers_hunger_by_the_feed_amount() {
    let rules = Rules::default();
    let mut pet = Pet::new("Hungry", t0());
    // eleven hours without food pushes hunger to the ceiling
    let starving = pet.status(t0() + TimeDelta::hours(11), &rules);
    assert!(starving.hunger.is_ceiling());

    let now = t0() + TimeDelta::hours(11);
    assert_eq!(pet.feed(rules.feed_amount, now, &rules), Outcome::Done);
    assert_eq!(pet.hunger().value(), 100.0 - f64::from(rules.feed_amount));

    pet.feed(1_000, now, &rules);
    assert!(pet.hunger().is_floor());
}

#[test]
fn sleep_then_status_at_same_instant() {
    let rules = Rules::default();
    let clock = ManualClock::new(t0());
    let mut keeper = Keeper::new("Dozy", clock, rules.clone(), "pet.json");
    keeper.clock().advance(TimeDelta::minutes(30));
    let before = keeper.status();

    keeper.sleep(Some(1));
    let after = keeper.status();

    assert_eq!(
        after.energy.value(),
        (before.energy.value() + rules.sleep_energy_per_hour).min(100.0)
    );
    assert_eq!(
        after.hunger.value(),
        before.hunger.value() + rules.sleep_hunger_per_hour
    );
    assert_eq!(after.happiness, before.happiness);
}

#[test]
fn playing_at_the_energy_floor_is_not_an_error() {
    let rules = Rules::default();
    let mut pet = Pet::new("Tired", t0());
    let now = t0() + TimeDelta::hours(10);
    assert!(pet.status(now, &rules).energy.is_floor());
    let happiness = pet.happiness();

    assert_eq!(pet.play(30, now, &rules), Outcome::Exhausted);
    assert_eq!(pet.happiness(), happiness);
    assert!(pet.energy().is_floor());
}
