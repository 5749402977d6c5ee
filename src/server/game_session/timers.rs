/// Maps engine directives onto actix timers for a GameSession.
/// Every handle is tracked so it can be cancelled when the engine asks.

use actix::prelude::*;
use log::debug;

use crate::game::timing::Directive;
use crate::server::game_session::server::GameSession;

/// Apply directives in order: start or stop the countdown, schedule or drop one-shot tasks.
pub fn apply_directives(this: &mut GameSession, ctx: &mut Context<GameSession>, directives: Vec<Directive>) {
    for directive in directives {
        match directive {
            Directive::StartCountdown { ticket, interval } => {
                stop_countdown(this, ctx);
                let handle = ctx.run_interval(interval, move |act, ctx| {
                    act.fire(ticket, ctx);
                });
                this.countdown = Some(handle);
            }
            Directive::StopCountdown => stop_countdown(this, ctx),
            Directive::Schedule { ticket, delay } => {
                debug!(
                    "[GameSession] Scheduled {:?} in {:?} (generation {})",
                    ticket.task, delay, ticket.generation
                );
                let handle = ctx.run_later(delay, move |act, ctx| {
                    act.fire(ticket, ctx);
                });
                this.pending.push(handle);
            }
            Directive::CancelPending => {
                for handle in this.pending.drain(..) {
                    ctx.cancel_future(handle);
                }
            }
        }
    }
}

fn stop_countdown(this: &mut GameSession, ctx: &mut Context<GameSession>) {
    if let Some(handle) = this.countdown.take() {
        ctx.cancel_future(handle);
    }
}
