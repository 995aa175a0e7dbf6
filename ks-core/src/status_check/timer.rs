use std::time::Duration;

use tokio::time::Instant;

use super::*;

// A countdown that can be armed, re-armed, and asked whether it has run out.  A `None` duration
// never runs out.
#[derive(Clone, Debug)]
pub struct CountdownTimer {
    duration: Option<Duration>,
    started_at: Option<Instant>,
}

impl CountdownTimer {
    pub fn new(duration: Option<Duration>) -> CountdownTimer {
        CountdownTimer { duration, started_at: None }
    }

    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
    }

    pub fn reset(&mut self) {
        self.started_at = None;
    }

    pub fn has_started(&self) -> bool {
        self.started_at.is_some()
    }

    pub fn has_completed(&self) -> bool {
        match (self.started_at, self.duration) {
            (Some(started_at), Some(duration)) => started_at.elapsed() >= duration,
            _ => false,
        }
    }
}

// Decides whether the loop keeps going after each tick.  Once the deployment reaches a terminal
// status it also has to hold that status for the stabilization window; any change of status
// restarts the window (or disarms it, if we're back to InProgress).
#[derive(Clone, Debug)]
pub struct StabilizingTimer {
    deployment: CountdownTimer,
    stabilization: CountdownTimer,
    stabilization_timeout: Duration,
}

impl StabilizingTimer {
    pub fn new(deployment_timeout: Option<Duration>, stabilization_timeout: Duration) -> StabilizingTimer {
        StabilizingTimer {
            deployment: CountdownTimer::new(deployment_timeout),
            stabilization: CountdownTimer::new(Some(stabilization_timeout)),
            stabilization_timeout,
        }
    }

    pub fn start(&mut self) {
        self.deployment.start();
        self.stabilization.reset();
    }

    pub fn has_timed_out(&self) -> bool {
        self.deployment.has_completed()
    }

    pub fn should_continue(&mut self, previous: DeploymentStatus, current: DeploymentStatus) -> bool {
        if self.deployment.has_completed() {
            return false;
        }

        if !current.is_terminal() {
            self.stabilization.reset();
            return true;
        }

        if self.stabilization_timeout.is_zero() {
            return false;
        }

        if previous != current || !self.stabilization.has_started() {
            self.stabilization.start();
            return true;
        }

        !self.stabilization.has_completed()
    }
}

// Everything the polling loop needs to know about time: how long to sleep between ticks and when
// to stop.
#[derive(Clone, Debug)]
pub struct Timer {
    interval: Duration,
    stabilizing: StabilizingTimer,
}

impl Timer {
    pub fn new(interval: Duration, deployment_timeout: Option<Duration>, stabilization_timeout: Duration) -> Timer {
        Timer {
            interval,
            stabilizing: StabilizingTimer::new(deployment_timeout, stabilization_timeout),
        }
    }

    pub fn with_default_interval(deployment_timeout: Option<Duration>, stabilization_timeout: Duration) -> Timer {
        Timer::new(Duration::from_secs(POLLING_INTERVAL_SECONDS), deployment_timeout, stabilization_timeout)
    }

    pub fn start(&mut self) {
        self.stabilizing.start();
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn has_timed_out(&self) -> bool {
        self.stabilizing.has_timed_out()
    }

    pub fn should_continue(&mut self, previous: DeploymentStatus, current: DeploymentStatus) -> bool {
        self.stabilizing.should_continue(previous, current)
    }

    pub async fn wait_for_interval(&self) {
        tokio::time::sleep(self.interval).await;
    }
}
