use actix_web_actors::ws;
use actix::ActorContext;

use crate::server::ws_error::{ws_banned_message, ws_error_message};
use crate::server::anti_spam::AntiSpamState;

/// Helpers shared by WebSocket actors that carry a flood guard.
pub trait WsActorUtils {
    fn anti_spam(&mut self) -> &mut AntiSpamState;
    fn client_id(&self) -> String;

    /// Sends the ban notice, then closes and stops the actor.
    fn send_ban_and_close<A>(&mut self, ctx: &mut ws::WebsocketContext<A>)
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let client_id = self.client_id();
        let ban_remaining_secs = self.anti_spam().ban_remaining_secs();
        ctx.text(ws_banned_message(ban_remaining_secs, Some(&client_id)));
        ctx.close(Some(ws::CloseReason {
            code: ws::CloseCode::Policy,
            description: Some("Banned for spam".into()),
        }));
        ctx.stop();
    }

    /// Sends an error unless it repeats the previous one, banning on response flood.
    fn send_error_and_maybe_ban<A>(
        &mut self,
        ctx: &mut ws::WebsocketContext<A>,
        code: &str,
        message: &str,
        context: Option<String>,
    )
    where
        A: actix::Actor<Context = ws::WebsocketContext<A>>,
    {
        let client_id = self.client_id();
        if self.anti_spam().should_send_error(code, &client_id) {
            if self.anti_spam().record_response(&client_id) {
                self.send_ban_and_close(ctx);
                return;
            }
            ctx.text(ws_error_message(code, message, context.as_deref()));
        }
    }
}
