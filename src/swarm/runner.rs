use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::Semaphore;
use tokio::time::{Instant, MissedTickBehavior, interval, sleep_until};
use tracing::{debug, info};

use crate::shutdown::ShutdownSender;

use super::client::UserClient;
use super::task::Task;
use super::user::run_user;
use super::wait::WaitTime;

/// Users are released in batches of `spawn_rate` on this cadence.
const SPAWN_TICK: Duration = Duration::from_secs(1);
/// Upper bound for a single run (one year).
const MAX_RUN_TIME: Duration = Duration::from_secs(31_536_000);

#[derive(Debug, Clone, Copy)]
pub struct SwarmPlan {
    pub users: usize,
    pub spawn_rate: usize,
    pub run_time: Duration,
    pub wait: WaitTime,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SwarmOutcome {
    pub users_started: usize,
    pub iterations: u64,
}

/// Ramps up `plan.users` simulated users and runs them until `plan.run_time`
/// elapses or shutdown is broadcast.
///
/// When the run time is up, shutdown is broadcast so in-flight requests are
/// abandoned. All users are joined before returning. `client` is dropped on
/// return, so the metrics channel closes once the last user is gone.
pub async fn run_swarm(
    plan: &SwarmPlan,
    task: Arc<dyn Task>,
    client: UserClient,
    shutdown_tx: &ShutdownSender,
) -> SwarmOutcome {
    let run_start = Instant::now();
    let deadline = run_start
        .checked_add(plan.run_time.min(MAX_RUN_TIME))
        .unwrap_or(run_start);
    let mut shutdown_rx = shutdown_tx.subscribe();
    let permits = Arc::new(Semaphore::new(0));
    let spawn_rate = plan.spawn_rate.max(1);

    info!(
        "Starting {} users at {}/s against {}{} for {:?}, waiting {:?}..{:?}",
        plan.users,
        spawn_rate,
        client.base_url(),
        task.name().trim_start_matches('/'),
        plan.run_time,
        plan.wait.min(),
        plan.wait.max()
    );

    let mut handles = Vec::with_capacity(plan.users);
    for id in 0..plan.users {
        let permits = Arc::clone(&permits);
        let task = Arc::clone(&task);
        let client = client.clone();
        let mut shutdown_rx_user = shutdown_tx.subscribe();
        let wait = plan.wait;

        handles.push(tokio::spawn(async move {
            let startup_permit = tokio::select! {
                _ = shutdown_rx_user.recv() => return None,
                permit = permits.acquire_owned() => permit,
            };
            let Ok(_startup_permit) = startup_permit else {
                return None;
            };
            let rng = StdRng::from_entropy();
            Some(run_user(id, task, wait, client, deadline, shutdown_rx_user, rng).await)
        }));
    }
    drop(client);

    let mut spawn_interval = interval(SPAWN_TICK);
    spawn_interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
    let mut released: usize = 0;

    loop {
        tokio::select! {
            _ = shutdown_rx.recv() => break,
            () = sleep_until(deadline) => {
                debug!("Run time elapsed, stopping users.");
                drop(shutdown_tx.send(()));
                break;
            }
            _ = spawn_interval.tick(), if released < plan.users => {
                let batch = spawn_rate.min(plan.users.saturating_sub(released));
                permits.add_permits(batch);
                released = released.saturating_add(batch);
                debug!("Released {} users ({}/{})", batch, released, plan.users);
            }
        }
    }

    let mut outcome = SwarmOutcome::default();
    for handle in handles {
        match handle.await {
            Ok(Some(iterations)) => {
                outcome.users_started = outcome.users_started.saturating_add(1);
                outcome.iterations = outcome.iterations.saturating_add(iterations);
            }
            Ok(None) => {}
            Err(err) => tracing::error!("Simulated user task failed: {}", err),
        }
    }

    info!(
        "{} users finished {} iterations in {:?}",
        outcome.users_started,
        outcome.iterations,
        run_start.elapsed()
    );
    outcome
}
