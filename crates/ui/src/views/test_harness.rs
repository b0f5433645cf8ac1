use std::time::Duration;

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use services::{LessonApi, SessionIntent};

use crate::context::AppContext;
use crate::views::{SessionScreen, SessionView};
use crate::vm::SessionScreenVm;

#[derive(Props, Clone, PartialEq)]
struct ScreenHarnessProps {
    screen: SessionScreenVm,
    notice: Option<String>,
}

#[component]
fn ScreenHarness(props: ScreenHarnessProps) -> Element {
    rsx! {
        SessionScreen {
            screen: props.screen.clone(),
            notice: props.notice.clone(),
            on_intent: move |_: SessionIntent| {},
        }
    }
}

/// Render a static screen view model to HTML.
pub fn render_screen(screen: SessionScreenVm, notice: Option<String>) -> String {
    let mut dom = VirtualDom::new_with_props(ScreenHarness, ScreenHarnessProps { screen, notice });
    dom.rebuild_in_place();
    dioxus_ssr::render(&dom)
}

#[derive(Props, Clone)]
struct LiveHarnessProps {
    api: LessonApi,
}

impl PartialEq for LiveHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn LiveHarness(props: LiveHarnessProps) -> Element {
    let api = props.api.clone();
    use_context_provider(|| AppContext::new(api));
    rsx! { SessionView {} }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
}

impl ViewHarness {
    pub fn new(api: LessonApi) -> Self {
        let mut dom = VirtualDom::new_with_props(LiveHarness, LiveHarnessProps { api });
        dom.rebuild_in_place();
        Self { dom }
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(Duration::from_millis(50), self.dom.wait_for_work()).await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    /// Drive the dom until the rendered HTML satisfies `done`, or give up.
    pub async fn render_until(&mut self, done: impl Fn(&str) -> bool) -> String {
        for _ in 0..40 {
            let html = self.render();
            if done(&html) {
                return html;
            }
            self.drive_async().await;
        }
        self.render()
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}
