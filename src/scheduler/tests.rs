use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::time::sleep;

use super::*;

fn counting(scheduler: &Scheduler) -> Arc<AtomicUsize> {
    let count = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&count);
    scheduler.slot().set(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        Ok(())
    });
    count
}

#[tokio::test(start_paused = true)]
async fn starts_disabled_with_full_countdown() {
    let scheduler = Scheduler::new(300, Handle::current());
    let status = scheduler.status();
    assert!(!status.enabled);
    assert_eq!(status.seconds_until_next_refresh, 300);
    assert_eq!(status.interval_seconds, 300);
    assert_eq!(status.next_refresh_in(), "5:00");
}

#[tokio::test(start_paused = true)]
async fn enable_then_disable_never_fires() {
    let mut scheduler = Scheduler::new(5, Handle::current());
    let count = counting(&scheduler);

    scheduler.enable();
    scheduler.disable();
    sleep(Duration::from_secs(1_000)).await;

    assert_eq!(count.load(Ordering::SeqCst), 0);
    assert_eq!(scheduler.refresh_count(), 0);
    assert_eq!(scheduler.status().seconds_until_next_refresh, 5);
}

#[tokio::test(start_paused = true)]
async fn countdown_decrements_each_second_and_resets_on_refresh() {
    let mut scheduler = Scheduler::new(10, Handle::current());
    let count = counting(&scheduler);
    scheduler.enable();

    sleep(Duration::from_millis(500)).await;
    assert_eq!(scheduler.status().seconds_until_next_refresh, 10);
    for expected in (7..=9).rev() {
        sleep(Duration::from_secs(1)).await;
        assert_eq!(scheduler.status().seconds_until_next_refresh, expected);
    }

    // t = 10.5s: the refresh tick has fired once and reset the countdown.
    sleep(Duration::from_secs(7)).await;
    assert_eq!(count.load(Ordering::SeqCst), 1);
    assert_eq!(scheduler.status().seconds_until_next_refresh, 10);

    sleep(Duration::from_secs(1)).await;
    assert_eq!(scheduler.status().seconds_until_next_refresh, 9);
}

#[tokio::test(start_paused = true)]
async fn disable_stops_further_refreshes() {
    let mut scheduler = Scheduler::new(5, Handle::current());
    let count = counting(&scheduler);
    scheduler.enable();

    sleep(Duration::from_millis(10_500)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);

    scheduler.disable();
    let frozen = scheduler.status().seconds_until_next_refresh;
    sleep(Duration::from_secs(60)).await;
    assert_eq!(count.load(Ordering::SeqCst), 2);
    assert_eq!(scheduler.status().seconds_until_next_refresh, frozen);
}

#[tokio::test(start_paused = true)]
async fn re_enabling_resets_countdown() {
    let mut scheduler = Scheduler::new(30, Handle::current());
    assert!(scheduler.toggle());

    sleep(Duration::from_millis(4_500)).await;
    assert_eq!(scheduler.status().seconds_until_next_refresh, 26);

    assert!(!scheduler.toggle());
    assert!(scheduler.toggle());
    assert_eq!(scheduler.status().seconds_until_next_refresh, 30);

    sleep(Duration::from_millis(1_500)).await;
    assert_eq!(scheduler.status().seconds_until_next_refresh, 29);
}

#[tokio::test(start_paused = true)]
async fn failing_callback_keeps_ticking() {
    let mut scheduler = Scheduler::new(2, Handle::current());
    let attempts = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&attempts);
    scheduler.slot().set(move || {
        counter.fetch_add(1, Ordering::SeqCst);
        anyhow::bail!("network down")
    });
    scheduler.enable();

    sleep(Duration::from_millis(6_500)).await;
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
    assert_eq!(scheduler.refresh_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn fires_the_callback_installed_at_tick_time() {
    let mut scheduler = Scheduler::new(4, Handle::current());
    let first = counting(&scheduler);
    scheduler.enable();

    sleep(Duration::from_millis(4_500)).await;
    let second = counting(&scheduler);
    sleep(Duration::from_secs(4)).await;

    assert_eq!(first.load(Ordering::SeqCst), 1);
    assert_eq!(second.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn dropping_the_scheduler_cancels_ticks() {
    let scheduler_count;
    {
        let mut scheduler = Scheduler::new(1, Handle::current());
        scheduler_count = counting(&scheduler);
        scheduler.enable();
    }
    sleep(Duration::from_secs(10)).await;
    assert_eq!(scheduler_count.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn unschedulable_interval_stays_disabled() {
    let mut scheduler = Scheduler::new(u64::MAX, Handle::current());
    let count = counting(&scheduler);

    scheduler.enable();
    assert!(!scheduler.is_enabled());
    assert!(!scheduler.toggle());

    sleep(Duration::from_secs(10)).await;
    assert_eq!(count.load(Ordering::SeqCst), 0);
}

#[test]
fn refresh_before_boundary_tick_still_shows_full_interval() {
    let mut state = Shared::new(Countdown::new(3));
    state.restart();
    assert_eq!(state.countdown_tick(), 2);
    assert_eq!(state.countdown_tick(), 1);

    state.refreshed(3);
    assert_eq!(state.countdown_tick(), 3);
    assert_eq!(state.countdown_tick(), 2);
    assert_eq!(state.refreshes, 1);
}

#[test]
fn refresh_after_boundary_tick_shows_full_interval() {
    let mut state = Shared::new(Countdown::new(3));
    state.restart();
    for _ in 0..3 {
        state.countdown_tick();
    }
    assert_eq!(state.countdown.remaining(), 3);

    state.refreshed(3);
    assert_eq!(state.countdown.remaining(), 3);
    assert_eq!(state.countdown_tick(), 2);
}

#[test]
fn restart_drops_a_pending_reset() {
    let mut state = Shared::new(Countdown::new(5));
    state.countdown_tick();
    state.refreshed(5);
    state.restart();

    assert_eq!(state.countdown.remaining(), 5);
    assert_eq!(state.countdown_tick(), 4);
}
