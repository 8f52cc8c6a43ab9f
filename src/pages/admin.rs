//! Admin scheme management: a small state machine over login, listing,
//! form editing and deletion. All network outcomes land here as state
//! changes plus notices; rendering stays in the binary.

use tabled::Tabled;
use tracing::{error, warn};

use crate::format::format_inr;
use crate::models::scheme::{Scheme, SchemeForm};
use crate::models::session::AdminToken;
use crate::pages::Notice;
use crate::services::scheme_api::SchemeApiService;

/// Where the admin view currently is. A form is only ever open on top of an
/// authenticated listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminPhase {
    Unauthenticated,
    Listing,
    FormOpen { editing: bool },
}

/// One row of the admin listing. Inactive records stay listed but tagged.
#[derive(Debug, Clone, PartialEq, Eq, Tabled)]
pub struct SchemeRow {
    #[tabled(rename = "#")]
    pub index: usize,
    #[tabled(rename = "Title")]
    pub title: String,
    #[tabled(rename = "Min")]
    pub min_investment: String,
    #[tabled(rename = "Max")]
    pub max_investment: String,
    #[tabled(rename = "Returns")]
    pub returns: String,
    #[tabled(rename = "Duration")]
    pub duration: String,
    #[tabled(rename = "Tags")]
    pub tags: String,
}

struct OpenForm {
    /// Id of the record being edited; `None` while creating.
    target: Option<String>,
    data: SchemeForm,
}

struct Session {
    token: AdminToken,
    schemes: Vec<Scheme>,
    form: Option<OpenForm>,
}

/// The admin page controller. Holds the session token, the loaded scheme
/// list and at most one open form.
#[derive(Default)]
pub struct AdminPage {
    session: Option<Session>,
    notices: Vec<Notice>,
}

impl AdminPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> AdminPhase {
        match &self.session {
            None => AdminPhase::Unauthenticated,
            Some(session) => match &session.form {
                None => AdminPhase::Listing,
                Some(form) => AdminPhase::FormOpen {
                    editing: form.target.is_some(),
                },
            },
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn schemes(&self) -> &[Scheme] {
        match &self.session {
            Some(session) => &session.schemes,
            None => &[],
        }
    }

    /// Drain accumulated notices in the order they were produced.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// Exchange the password for a session token and load the full list.
    /// Any login failure leaves the page unauthenticated; the notice does
    /// not distinguish a rejected password from a transport error.
    pub async fn login(&mut self, api: &SchemeApiService, password: &str) {
        match api.login(password).await {
            Ok(token) => {
                self.session = Some(Session {
                    token,
                    schemes: Vec::new(),
                    form: None,
                });
                self.notices.push(Notice::success("Login successful!"));
                self.refresh_schemes(api).await;
            }
            Err(e) => {
                warn!("Admin login failed: {}", e);
                self.notices.push(Notice::error("Invalid password"));
            }
        }
    }

    /// Re-read the full list, inactive records included. The visible list
    /// is only ever replaced by a fresh full read, never patched locally.
    pub async fn refresh_schemes(&mut self, api: &SchemeApiService) {
        if self.session.is_none() {
            return;
        }
        match api.list_schemes(false).await {
            Ok(schemes) => {
                if let Some(session) = self.session.as_mut() {
                    session.schemes = schemes;
                }
            }
            Err(e) => {
                error!("Failed to load schemes: {}", e);
                self.notices.push(Notice::error("Failed to load schemes"));
            }
        }
    }

    /// Open a blank create form, replacing any form already open.
    pub fn open_create(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.form = Some(OpenForm {
                target: None,
                data: SchemeForm::default(),
            });
        }
    }

    /// Open an edit form populated from the listed record with the given
    /// id. Returns false when the id is not in the loaded list.
    pub fn open_edit(&mut self, id: &str) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let Some(scheme) = session.schemes.iter().find(|s| s.id == id) else {
            return false;
        };
        let form = OpenForm {
            target: Some(scheme.id.clone()),
            data: SchemeForm::from_scheme(scheme),
        };
        session.form = Some(form);
        true
    }

    pub fn form_mut(&mut self) -> Option<&mut SchemeForm> {
        self.session
            .as_mut()
            .and_then(|session| session.form.as_mut())
            .map(|form| &mut form.data)
    }

    pub fn editing_id(&self) -> Option<&str> {
        self.session
            .as_ref()
            .and_then(|session| session.form.as_ref())
            .and_then(|form| form.target.as_deref())
    }

    /// Drop the session and ask for a fresh login once the token is past
    /// its TTL. Returns true when the session was dropped.
    fn drop_expired_session(&mut self) -> bool {
        let expired = self
            .session
            .as_ref()
            .is_some_and(|session| session.token.is_expired());
        if expired {
            self.session = None;
            self.notices
                .push(Notice::error("Session expired. Please log in again."));
        }
        expired
    }

    /// Parse, validate and submit the open form. Invalid input produces a
    /// typed error notice and no request; the typed text stays in place.
    /// On success the form closes and the list is re-fetched.
    pub async fn submit_form(&mut self, api: &SchemeApiService) {
        if self.drop_expired_session() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        let Some(open) = session.form.as_ref() else {
            return;
        };

        let input = match open.data.parse() {
            Ok(input) => input,
            Err(e) => {
                self.notices.push(Notice::error(e.to_string()));
                return;
            }
        };

        let result = match &open.target {
            Some(id) => api
                .update_scheme(&session.token, id, &input)
                .await
                .map(|_| "Scheme updated!"),
            None => api
                .create_scheme(&session.token, &input)
                .await
                .map(|_| "Scheme created!"),
        };

        match result {
            Ok(message) => {
                if let Some(session) = self.session.as_mut() {
                    session.form = None;
                }
                self.notices.push(Notice::success(message));
                self.refresh_schemes(api).await;
            }
            Err(e) => {
                error!("Failed to save scheme: {}", e);
                self.notices
                    .push(Notice::error(e.user_message("Failed to save scheme")));
            }
        }
    }

    /// Close the form without sending anything.
    pub fn cancel_form(&mut self) {
        if let Some(session) = self.session.as_mut() {
            session.form = None;
        }
    }

    /// Delete a scheme, gated on an explicit confirmation. A declined
    /// confirmation issues no request at all. Failure after confirmation
    /// changes no local state.
    pub async fn delete_scheme(&mut self, api: &SchemeApiService, id: &str, confirmed: bool) {
        if !confirmed {
            return;
        }
        if self.drop_expired_session() {
            return;
        }
        let Some(session) = self.session.as_ref() else {
            return;
        };
        match api.delete_scheme(&session.token, id).await {
            Ok(()) => {
                self.notices.push(Notice::success("Scheme deleted!"));
                self.refresh_schemes(api).await;
            }
            Err(e) => {
                error!("Failed to delete scheme {}: {}", id, e);
                self.notices.push(Notice::error("Failed to delete scheme"));
            }
        }
    }

    /// Drop the token and everything loaded with it.
    pub fn logout(&mut self) {
        self.session = None;
    }

    /// Listing view-models, one per record. Indices are 1-based to match
    /// the console's `edit <n>` / `delete <n>` commands.
    pub fn rows(&self) -> Vec<SchemeRow> {
        self.schemes()
            .iter()
            .enumerate()
            .map(|(i, scheme)| {
                let mut tags = Vec::new();
                if scheme.is_popular {
                    tags.push("POPULAR");
                }
                if !scheme.is_active {
                    tags.push("INACTIVE");
                }
                SchemeRow {
                    index: i + 1,
                    title: scheme.title.clone(),
                    min_investment: format_inr(scheme.min_investment),
                    max_investment: format_inr(scheme.max_investment),
                    returns: format!("{}%", scheme.return_percentage),
                    duration: format!("{} month(s)", scheme.duration_months),
                    tags: tags.join(" "),
                }
            })
            .collect()
    }
}
