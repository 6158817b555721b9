use std::time::Duration;

use clap::Subcommand;
use timerbank_core::{
    format_hms, parse_hms, AppContext, BalanceSnapshot, Config, Event, NoopNotifier,
    NotificationSink, TimerState,
};

use crate::notifier::DesktopNotifier;
use crate::state;

#[derive(Subcommand)]
pub enum SessionAction {
    /// Start a session, withdrawing its duration from the bank
    Start {
        /// Duration (SS, MM:SS, or HH:MM:SS); defaults to the
        /// configured session.default_duration_min
        duration: Option<String>,
    },
    /// Pause the running session
    Pause,
    /// Resume a paused session
    Resume,
    /// Stop the session, refunding unused time
    Stop,
    /// Process a single tick (for external schedulers)
    Tick,
    /// Print the current session state as JSON
    Status,
    /// Drive the session with a tick loop until the bank depletes
    Watch,
}

fn open_context() -> Result<AppContext, Box<dyn std::error::Error>> {
    let config = Config::load_or_default();
    let sink: Box<dyn NotificationSink> = if config.notifications.enabled {
        Box::new(DesktopNotifier::new(
            config.notifications.custom_sound.clone(),
        ))
    } else {
        Box::new(NoopNotifier)
    };
    let mut ctx = AppContext::init_with(config, BalanceSnapshot::default_location()?, sink)?;
    ctx.restore_timer(state::load_timer());
    Ok(ctx)
}

fn persist(ctx: &AppContext) -> Result<(), Box<dyn std::error::Error>> {
    ctx.save_balance()?;
    state::save_timer(ctx.session().timer())?;
    Ok(())
}

fn emit(event: &Event, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    if config.display.json_events {
        println!("{}", serde_json::to_string_pretty(event)?);
    } else {
        println!("{}", describe(event));
    }
    Ok(())
}

fn describe(event: &Event) -> String {
    match event {
        Event::SessionStarted {
            duration_secs,
            balance_secs,
            ..
        } => format!(
            "session started for {}, balance {}",
            format_hms(*duration_secs),
            format_hms(*balance_secs)
        ),
        Event::SessionPaused { remaining_secs, .. } => {
            format!("paused at {}", format_hms(*remaining_secs))
        }
        Event::SessionResumed { remaining_secs, .. } => {
            format!("resumed at {}", format_hms(*remaining_secs))
        }
        Event::SessionStopped {
            refunded_secs,
            balance_secs,
            ..
        } => format!(
            "stopped, refunded {}, balance {}",
            format_hms(*refunded_secs),
            format_hms(*balance_secs)
        ),
        Event::Tick { remaining_secs, .. } => format_hms(*remaining_secs),
        Event::TimerCompleted { .. } => "time's up, overdraft started".to_string(),
        Event::OverdraftWithdrawal { balance_secs, .. } => {
            format!("overdraft, balance {}", format_hms(*balance_secs))
        }
        Event::BankDepleted { .. } => "bank depleted, session stopped".to_string(),
        Event::BalanceChanged { balance_secs, .. } => {
            format!("balance {}", format_hms(*balance_secs))
        }
        Event::StateSnapshot {
            state,
            remaining_secs,
            balance_hms,
            ..
        } => format!(
            "{state:?}, {} remaining, balance {balance_hms}",
            format_hms(*remaining_secs)
        ),
    }
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    let mut ctx = open_context()?;

    match action {
        SessionAction::Start { duration } => {
            let seconds = match duration {
                Some(d) => parse_hms(&d)?,
                None => u64::from(ctx.config().session.default_duration_min) * 60,
            };
            match ctx.session_mut().start_session(seconds) {
                Some(event) => {
                    persist(&ctx)?;
                    emit(&event, ctx.config())?;
                }
                None => {
                    let active = !matches!(
                        ctx.session().timer().state(),
                        TimerState::Idle | TimerState::Stopped
                    );
                    if active {
                        eprintln!("a session is already active");
                    } else {
                        eprintln!(
                            "cannot start: need {}, balance {}",
                            format_hms(seconds),
                            format_hms(ctx.session().balance())
                        );
                    }
                    std::process::exit(1);
                }
            }
        }
        SessionAction::Pause => match ctx.session_mut().pause_session() {
            Some(event) => {
                persist(&ctx)?;
                emit(&event, ctx.config())?;
            }
            None => println!("nothing to pause"),
        },
        SessionAction::Resume => match ctx.session_mut().resume_session() {
            Some(event) => {
                persist(&ctx)?;
                emit(&event, ctx.config())?;
            }
            None => println!("nothing to resume"),
        },
        SessionAction::Stop => match ctx.session_mut().stop_session() {
            Some(event) => {
                persist(&ctx)?;
                emit(&event, ctx.config())?;
            }
            None => println!("nothing to stop"),
        },
        SessionAction::Tick => {
            if let Some(event) = ctx.session_mut().on_tick() {
                persist(&ctx)?;
                emit(&event, ctx.config())?;
            }
        }
        SessionAction::Status => {
            println!("{}", serde_json::to_string_pretty(&ctx.session().snapshot())?);
        }
        SessionAction::Watch => watch(ctx)?,
    }
    Ok(())
}

/// Tick source: drives `on_tick()` serially on the configured cadence,
/// persisting after every tick, until the session leaves `Running`.
fn watch(mut ctx: AppContext) -> Result<(), Box<dyn std::error::Error>> {
    if ctx.session().timer().state() != TimerState::Running {
        eprintln!("no running session to watch");
        std::process::exit(1);
    }

    let interval_ms = ctx.config().session.tick_interval_ms;
    // tokio::time::interval panics on a zero period; surface a bad
    // config value as a normal CLI error instead.
    if interval_ms == 0 {
        return Err("session.tick_interval_ms must be non-zero".into());
    }
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
        // Delay, never burst: ticks must not overlap or bunch up.
        interval.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        // The first interval tick fires immediately; consume it so the
        // first countdown second takes a full period.
        interval.tick().await;

        loop {
            interval.tick().await;
            let Some(event) = ctx.session_mut().on_tick() else {
                break;
            };
            persist(&ctx)?;
            emit(&event, ctx.config())?;
            if ctx.session().timer().state() != TimerState::Running {
                break;
            }
        }
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    ctx.shutdown();
    state::save_timer(ctx.session().timer())?;
    Ok(())
}
