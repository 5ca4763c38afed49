use tracing::{info, warn};

use crate::caddie::client::CompletionClient;
use crate::caddie::markdown::render_markdown;
use crate::caddie::prompt::CompletionRequest;
use crate::error::CompletionError;

/// What the page shows in place of the caddie's answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Advice {
    /// Display HTML. Either rendered Markdown or an escaped error line.
    pub html: String,
    pub is_error: bool,
}

impl Advice {
    fn failed(lead: &str, err: &CompletionError) -> Self {
        let message = maud::html! {
            p class="caddie-error" { "⚠ " (lead) " " (err.to_string()) }
        };
        Advice {
            html: message.into_string(),
            is_error: true,
        }
    }
}

/// Which request this is, for logs and the failure wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdviceKind {
    ShotAdvice,
    SwingAnalysis,
}

impl AdviceKind {
    fn failure_lead(self) -> &'static str {
        match self {
            AdviceKind::ShotAdvice => "The caddie lost focus!",
            AdviceKind::SwingAnalysis => "The caddie missed that swing!",
        }
    }
}

/// Make the single completion call and render the answer. Failures come back
/// as a flagged message; there is no retry.
pub async fn consult(
    client: &dyn CompletionClient,
    kind: AdviceKind,
    request: &CompletionRequest,
) -> Advice {
    info!(
        kind = ?kind,
        with_image = request.image.is_some(),
        prompt_chars = request.user_text.len(),
        "asking the caddie"
    );
    match client.complete(request).await {
        Ok(text) => Advice {
            html: render_markdown(&text),
            is_error: false,
        },
        Err(e) => {
            warn!(kind = ?kind, error = %e, "completion call failed");
            Advice::failed(kind.failure_lead(), &e)
        }
    }
}
