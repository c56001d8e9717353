use std::sync::Arc;

use rand::rngs::StdRng;
use tokio::time::{Instant, sleep_until};
use tracing::debug;

use crate::shutdown::ShutdownReceiver;

use super::client::UserClient;
use super::task::Task;
use super::wait::WaitTime;

/// Runs one simulated user until `deadline` or a shutdown broadcast.
///
/// The first task run starts immediately; every following run is preceded by
/// a wait drawn from `wait`. Returns the number of task runs that completed.
pub async fn run_user(
    id: usize,
    task: Arc<dyn Task>,
    wait: WaitTime,
    client: UserClient,
    deadline: Instant,
    mut shutdown_rx: ShutdownReceiver,
    mut rng: StdRng,
) -> u64 {
    debug!("User {} started ({})", id, task.name());
    let mut iterations: u64 = 0;

    loop {
        if Instant::now() >= deadline {
            break;
        }

        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            () = task.run(&client) => {
                iterations = iterations.saturating_add(1);
            }
        }

        let pause = wait.sample(&mut rng);
        let wake = Instant::now()
            .checked_add(pause)
            .map_or(deadline, |wake| wake.min(deadline));

        tokio::select! {
            biased;
            _ = shutdown_rx.recv() => break,
            () = sleep_until(wake) => {}
        }
    }

    debug!("User {} stopped after {} iterations", id, iterations);
    iterations
}
