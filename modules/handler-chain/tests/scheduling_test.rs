//! Process-wide and per-chain scheduling.
//!
//! Kept in its own test binary: the global flag is shared by every test in
//! a process.

use std::sync::{Arc, Mutex};

use handler_chain::{
    compose, deferred_scheduling, set_deferred_scheduling, Chain, ChainConfig, Handler, Schedule,
};

type Log = Arc<Mutex<Vec<String>>>;

fn steps(label: &'static str, count: usize) -> Vec<Handler<Log, ()>> {
    (1..=count)
        .map(|i| {
            Handler::normal_sync(move |log: &mut Log, _: &mut ()| {
                log.lock().unwrap().push(format!("{label}{i}"));
                Ok(())
            })
        })
        .collect()
}

async fn run_pair(a: Chain<Log, ()>, b: Chain<Log, ()>) -> Vec<String> {
    let log: Log = Arc::default();
    let mut log_a = log.clone();
    let mut log_b = log.clone();
    let (mut unit_a, mut unit_b) = ((), ());

    let (ra, rb) = tokio::join!(a.run(&mut log_a, &mut unit_a), b.run(&mut log_b, &mut unit_b));
    ra.unwrap();
    rb.unwrap();

    let entries = log.lock().unwrap().clone();
    entries
}

fn index_of(log: &[String], entry: &str) -> usize {
    log.iter().position(|e| e == entry).unwrap()
}

#[tokio::test]
async fn scheduling_flag_and_overrides() {
    // Default is deferred.
    assert!(deferred_scheduling());
    assert_eq!(Schedule::global(), Schedule::Deferred);

    // Deferred chains yield between steps, so two of them interleave.
    let log = run_pair(compose(steps("a", 2)), compose(steps("b", 2))).await;
    assert!(index_of(&log, "b1") < index_of(&log, "a2"));

    // Immediate chains of synchronous handlers finish in one go.
    set_deferred_scheduling(false);
    assert_eq!(Schedule::global(), Schedule::Immediate);
    let log = run_pair(compose(steps("a", 2)), compose(steps("b", 2))).await;
    assert_eq!(log, vec!["a1", "a2", "b1", "b2"]);

    // An explicit schedule beats the process default.
    let log = run_pair(
        compose(steps("a", 2)).with_schedule(Schedule::Deferred),
        compose(steps("b", 2)).with_schedule(Schedule::Deferred),
    )
    .await;
    assert!(index_of(&log, "b1") < index_of(&log, "a2"));

    // Config round trip restores the default.
    let config = ChainConfig {
        scheduling: Schedule::Deferred,
    };
    config.apply();
    assert!(deferred_scheduling());

    Schedule::Immediate.make_global();
    assert!(!deferred_scheduling());
    set_deferred_scheduling(true);
}

#[test]
fn schedule_parses_and_displays() {
    assert_eq!("deferred".parse::<Schedule>().unwrap(), Schedule::Deferred);
    assert_eq!(" IMMEDIATE ".parse::<Schedule>().unwrap(), Schedule::Immediate);
    assert!("later".parse::<Schedule>().is_err());
    assert_eq!(Schedule::Immediate.to_string(), "immediate");
}
