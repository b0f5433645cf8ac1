use dioxus::prelude::*;
use futures_util::StreamExt;
use tracing::debug;

use services::{SessionDriver, SessionIntent, SessionState};

use crate::context::AppContext;
use crate::views::SessionScreen;
use crate::vm::map_session_screen;

/// Live practice screen. A coroutine owns the `SessionDriver`; clicks are sent
/// to it as intents and every applied change is mapped into `screen`.
#[component]
pub fn SessionView() -> Element {
    let ctx = use_context::<AppContext>();
    let mut screen = use_signal(|| map_session_screen(&SessionState::new()));
    let mut notice = use_signal(|| None::<String>);

    let session = use_coroutine(move |mut intents: UnboundedReceiver<SessionIntent>| {
        let api = ctx.api();
        async move {
            let mut driver = SessionDriver::new(api);
            if let Err(err) = driver.dispatch(SessionIntent::Start) {
                notice.set(Some(err.to_string()));
            }
            screen.set(map_session_screen(driver.state()));

            loop {
                tokio::select! {
                    intent = intents.next() => {
                        let Some(intent) = intent else { break };
                        match driver.dispatch(intent) {
                            Ok(()) => notice.set(None),
                            Err(err) => {
                                debug!(error = %err, "intent rejected");
                                notice.set(Some(err.to_string()));
                            }
                        }
                    }
                    applied = driver.next_completion(), if driver.in_flight() > 0 => {
                        if !applied {
                            continue;
                        }
                    }
                }
                screen.set(map_session_screen(driver.state()));
            }
        }
    });

    rsx! {
        SessionScreen {
            screen: screen(),
            notice: notice(),
            on_intent: move |intent| session.send(intent),
        }
    }
}
