use splashload::progress::{LoadingStatus, ProgressConfig, ProgressController, MAX_PROGRESS};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;

fn counting_controller(config: ProgressConfig) -> (ProgressController, Arc<AtomicUsize>) {
    let calls = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&calls);
    let controller = ProgressController::with_completion_callback(config, move || {
        counter.fetch_add(1, Ordering::SeqCst);
    })
    .unwrap();
    (controller, calls)
}

#[tokio::test(start_paused = true)]
async fn test_default_scenario_timeline() {
    let (controller, calls) = counting_controller(ProgressConfig::default());

    // t=0
    assert_eq!(controller.loading_status(), LoadingStatus::Loading);
    assert_eq!(controller.progress(), 0);

    // Seven ticks in, progress sits at the threshold
    sleep(Duration::from_millis(3600)).await;
    assert_eq!(controller.progress(), 70);
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert!(!controller.is_loaded());

    // Completion timer is armed for t=6500
    sleep(Duration::from_millis(2800)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Completed);
    assert_eq!(controller.progress(), MAX_PROGRESS);
    assert!(controller.is_loaded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Nothing fires again
    sleep(Duration::from_secs(30)).await;
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_done_scenario() {
    let (controller, calls) = counting_controller(ProgressConfig {
        auto_start: false,
        auto_complete: false,
        ..ProgressConfig::default()
    });

    sleep(Duration::from_secs(10)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Idle);
    assert_eq!(controller.progress(), 0);

    controller.start();
    sleep(Duration::from_millis(1100)).await;
    assert_eq!(controller.progress(), 20);

    // done() ignores the threshold entirely
    controller.done();
    assert_eq!(controller.loading_status(), LoadingStatus::Completed);
    assert_eq!(controller.progress(), MAX_PROGRESS);
    assert!(controller.is_loaded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // No ticks after completion
    sleep(Duration::from_secs(5)).await;
    assert_eq!(controller.progress(), MAX_PROGRESS);
}

#[tokio::test(start_paused = true)]
async fn test_done_from_idle() {
    let (controller, calls) = counting_controller(ProgressConfig {
        auto_start: false,
        auto_complete: false,
        ..ProgressConfig::default()
    });

    controller.done();
    assert!(controller.is_loaded());
    assert_eq!(controller.progress(), MAX_PROGRESS);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_manual_completion_waits_at_threshold() {
    let (controller, calls) = counting_controller(ProgressConfig {
        auto_complete: false,
        ..ProgressConfig::default()
    });

    sleep(Duration::from_secs(20)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(controller.progress(), 70);
    assert_eq!(calls.load(Ordering::SeqCst), 0);

    controller.done();
    assert!(controller.is_loaded());
}

#[tokio::test(start_paused = true)]
async fn test_done_ignored_with_auto_completion() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    sleep(Duration::from_millis(1100)).await;

    controller.done();
    assert_eq!(controller.loading_status(), LoadingStatus::Loading);
    assert_eq!(controller.progress(), 20);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_pause_without_tick_timer_is_ignored() {
    let controller = ProgressController::new(ProgressConfig {
        auto_start: false,
        auto_complete: false,
        ..ProgressConfig::default()
    })
    .unwrap();

    controller.pause();
    assert_eq!(controller.loading_status(), LoadingStatus::Idle);

    controller.done();
    controller.pause();
    assert_eq!(controller.loading_status(), LoadingStatus::Completed);
}

#[tokio::test(start_paused = true)]
async fn test_lowered_threshold_does_not_rearm_completion() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    sleep(Duration::from_millis(3600)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);

    // The timer armed at t=3500 still fires at t=6500
    controller.set_threshold(50);
    assert_eq!(controller.threshold(), 50);

    sleep(Duration::from_millis(2800)).await;
    assert!(!controller.is_loaded());
    sleep(Duration::from_millis(200)).await;
    assert!(controller.is_loaded());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_lowering_threshold_while_paused_arms_completion() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    sleep(Duration::from_millis(1600)).await;
    controller.pause();
    assert_eq!(controller.progress(), 30);

    // No tick runs while paused, so the threshold change itself arms the timer
    controller.set_threshold(20);
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);

    sleep(Duration::from_millis(2900)).await;
    assert!(!controller.is_loaded());
    sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Completed);
    assert_eq!(controller.progress(), MAX_PROGRESS);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_lowering_threshold_while_paused_respects_manual_completion() {
    let (controller, calls) = counting_controller(ProgressConfig {
        auto_complete: false,
        ..ProgressConfig::default()
    });
    sleep(Duration::from_millis(1600)).await;
    controller.pause();
    controller.set_threshold(20);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_raising_threshold_while_paused_does_not_arm_completion() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    sleep(Duration::from_millis(1600)).await;
    controller.pause();
    controller.set_threshold(90);

    sleep(Duration::from_secs(60)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(controller.progress(), 30);
    assert_eq!(calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_armed_completion_fires_after_resume() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    sleep(Duration::from_millis(3600)).await;

    // Raise the threshold and resume; the armed timer is not re-validated
    controller.set_threshold(100);
    controller.resume();
    assert_eq!(controller.loading_status(), LoadingStatus::Loading);

    sleep(Duration::from_millis(1100)).await;
    assert_eq!(controller.progress(), 90);

    sleep(Duration::from_millis(2000)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Completed);
    assert_eq!(controller.progress(), MAX_PROGRESS);
    assert_eq!(calls.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn test_progress_is_always_a_step_multiple() {
    let controller = ProgressController::new(ProgressConfig {
        increment_step: 15,
        initial_threshold: 80,
        auto_complete: false,
        ..ProgressConfig::default()
    })
    .unwrap();
    let mut updates = controller.subscribe();
    let mut seen = Vec::new();

    while updates.changed().await.is_ok() {
        let snapshot = *updates.borrow_and_update();
        seen.push(snapshot.progress);
        if snapshot.status == LoadingStatus::Paused {
            break;
        }
    }

    assert!(seen.iter().all(|p| *p <= MAX_PROGRESS && p % 15 == 0));
    // First multiple of 15 at or above 80, after ceil(80 / 15) ticks
    assert_eq!(*seen.last().unwrap(), 90);
    assert_eq!(controller.progress(), 90);
}

#[tokio::test(start_paused = true)]
async fn test_ticks_to_threshold_matches_timeline() {
    let config = ProgressConfig {
        increment_step: 30,
        initial_threshold: 70,
        ..ProgressConfig::default()
    };
    let ticks = u64::from(config.ticks_to_threshold());
    assert_eq!(ticks, 3);

    let controller = ProgressController::new(config).unwrap();
    sleep(Duration::from_millis(500 * (ticks - 1) + 100)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Loading);

    sleep(Duration::from_millis(500)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(controller.progress(), 90);
}

#[tokio::test(start_paused = true)]
async fn test_zero_threshold_pauses_on_first_tick() {
    let config = ProgressConfig {
        initial_threshold: 0,
        auto_complete: false,
        ..ProgressConfig::default()
    };
    assert_eq!(config.ticks_to_threshold(), 1);

    let controller = ProgressController::new(config).unwrap();
    sleep(Duration::from_millis(400)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Loading);

    sleep(Duration::from_millis(200)).await;
    assert_eq!(controller.loading_status(), LoadingStatus::Paused);
    assert_eq!(controller.progress(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_drop_cancels_pending_completion() {
    let (controller, calls) = counting_controller(ProgressConfig::default());
    let mut updates = controller.subscribe();
    sleep(Duration::from_millis(3600)).await;
    updates.borrow_and_update();

    drop(controller);
    sleep(Duration::from_secs(10)).await;

    assert_eq!(calls.load(Ordering::SeqCst), 0);
    // The sender lives in the dropped controller
    assert!(updates.changed().await.is_err());
}

#[tokio::test(start_paused = true)]
async fn test_independent_controllers() {
    let fast = ProgressController::new(ProgressConfig {
        increment_step: 50,
        auto_complete: false,
        ..ProgressConfig::default()
    })
    .unwrap();
    let slow = ProgressController::new(ProgressConfig::default()).unwrap();

    sleep(Duration::from_millis(1100)).await;
    fast.done();

    assert!(fast.is_loaded());
    assert!(!slow.is_loaded());
    assert_eq!(slow.progress(), 20);
}
