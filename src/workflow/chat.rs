use tracing::debug;

use crate::adapter::{ERROR_PREFIX, is_error_text};
use crate::context::AppContext;
use crate::domain::intent::{Intent, classify};
use crate::domain::ticket::{TicketDraft, find_ticket_key};
use crate::workflow::search::run_search;
use crate::workflow::ticket::create_from_draft;

pub const HELP_MESSAGE: &str = "\
Welcome to Jira Assistant! Here are some things you can ask me to do:

1. Create a new ticket:
   - \"Create a bug in KAN titled 'Login page crashes' with description 'The login page crashes on Safari'\"

2. Search for tickets:
   - \"Search for tickets in project KAN\"
   - \"Find all open tickets assigned to Pawan Kumar\"
   - \"project = KAN AND issuetype = Task\" (direct JQL query)

3. Get ticket details:
   - \"Show details for ticket KAN-123\"
   - \"What's the status of the ticket we just created?\"

What would you like to do today?";

/// One conversation. Remembers the last ticket it created so follow-ups
/// like "show the ticket we just created" resolve; nothing outlives the
/// session.
#[derive(Debug, Default)]
pub struct ChatSession {
    last_created: Option<String>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&mut self, ctx: &AppContext, input: &str) -> String {
        let input = input.trim();
        if input.is_empty() {
            return HELP_MESSAGE.to_string();
        }

        let intent = classify(input);
        debug!(?intent, "classified chat input");
        match intent {
            Intent::Create(draft) => self.create(ctx, &draft),
            Intent::Details(Some(key)) => details(ctx, &key),
            Intent::Details(None) => match self.last_created.clone() {
                Some(key) => details(ctx, &key),
                None => "I couldn't find a recently created ticket in our conversation. \
                         Could you specify the ticket ID you'd like details for?"
                    .to_string(),
            },
            Intent::Search(request) => {
                let jql = request.to_jql(ctx.config.default_project.as_deref());
                let result = run_search(ctx, &jql);
                if is_error_text(&result) {
                    format!(
                        "I encountered an error while searching for tickets:\n\n{result}\n\n\
                         Please check your search query and try again."
                    )
                } else {
                    format!("Here are the tickets I found (`{jql}`):\n\n{result}")
                }
            }
            Intent::Help => HELP_MESSAGE.to_string(),
        }
    }

    fn create(&mut self, ctx: &AppContext, draft: &TicketDraft) -> String {
        match create_from_draft(ctx, draft) {
            Ok(result) => {
                if let Some(key) = find_ticket_key(&result) {
                    self.last_created = Some(key);
                }
                format!("Great! I've created the ticket for you:\n\n{result}")
            }
            Err(err) => format!(
                "I tried to create a ticket based on your request, but it did not go through:\n\n\
                 {ERROR_PREFIX} {}\n\nPlease try again with more details.",
                err.detail()
            ),
        }
    }
}

fn details(ctx: &AppContext, key: &str) -> String {
    let result = ctx.jira.get_ticket(key);
    if is_error_text(&result) {
        format!("I couldn't retrieve ticket {key}:\n\n{result}")
    } else {
        format!("Here are the details for ticket {key}:\n\n{result}")
    }
}
