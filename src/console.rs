//! Pages of the administrative console.
//!
//! Every page sits behind the session: [`ConsolePage::is_accessible`] is the
//! client-side guard, and the session cookie written by
//! [`crate::storage::DurableSessionStorage`] serves the server-side one.
//!
//! # Example
//!
//! ```rust
//! use wa_console::console::ConsolePage;
//! use wa_console::store::AuthState;
//!
//! let page = ConsolePage::from_path("/contacts").unwrap();
//! assert_eq!(page.title(), "Contacts");
//! assert_eq!(page.primary_action(), Some("Add Contact"));
//! assert!(!page.is_accessible(&AuthState::default()));
//! ```

use std::fmt;
use std::str::FromStr;

use crate::store::AuthState;

/// Path unauthenticated visitors are sent to.
pub const LOGIN_PAGE_PATH: &str = "/login";

/// A page of the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ConsolePage {
    /// Overview statistics and shortcuts.
    Dashboard,
    /// The contact list.
    Contacts,
    /// Marketing campaigns.
    Campaigns,
    /// Message templates.
    Templates,
}

impl ConsolePage {
    /// All pages, in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Dashboard,
        Self::Contacts,
        Self::Campaigns,
        Self::Templates,
    ];

    /// Returns the route path of this page.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Dashboard => "/dashboard",
            Self::Contacts => "/contacts",
            Self::Campaigns => "/campaigns",
            Self::Templates => "/templates",
        }
    }

    /// Looks up a page by route path. A trailing slash is ignored.
    #[must_use]
    pub fn from_path(path: &str) -> Option<Self> {
        let path = match path.strip_suffix('/') {
            Some(stripped) if !stripped.is_empty() => stripped,
            _ => path,
        };
        Self::ALL.into_iter().find(|page| page.path() == path)
    }

    /// Returns the page heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Contacts => "Contacts",
            Self::Campaigns => "Campaigns",
            Self::Templates => "Templates",
        }
    }

    /// Returns the line shown under the heading.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Dashboard => {
                "Welcome back! Here's what's happening with your WhatsApp Business."
            }
            Self::Contacts => "Manage your WhatsApp Business contacts",
            Self::Campaigns => "Create and manage your WhatsApp marketing campaigns",
            Self::Templates => "Manage your WhatsApp message templates",
        }
    }

    /// Returns the label of the page's main button, if it has one.
    #[must_use]
    pub const fn primary_action(self) -> Option<&'static str> {
        match self {
            Self::Dashboard => None,
            Self::Contacts => Some("Add Contact"),
            Self::Campaigns => Some("New Campaign"),
            Self::Templates => Some("New Template"),
        }
    }

    /// Returns the search box placeholder, if the page has a search box.
    #[must_use]
    pub const fn search_placeholder(self) -> Option<&'static str> {
        match self {
            Self::Dashboard => None,
            Self::Contacts => Some("Search contacts..."),
            Self::Campaigns => Some("Search campaigns..."),
            Self::Templates => Some("Search templates..."),
        }
    }

    /// Returns the text shown when the page has nothing to list.
    #[must_use]
    pub const fn empty_state(self) -> &'static str {
        match self {
            Self::Dashboard => "No recent activity to display.",
            Self::Contacts => "No contacts found. Start by adding your first contact.",
            Self::Campaigns => "No campaigns found. Create your first campaign to get started.",
            Self::Templates => "No templates found. Create your first template to get started.",
        }
    }

    /// Returns the titles of the cards shown below the page body.
    #[must_use]
    pub const fn cards(self) -> &'static [&'static str] {
        match self {
            Self::Dashboard => &DASHBOARD_CARDS,
            Self::Contacts | Self::Campaigns | Self::Templates => &[],
        }
    }

    /// Returns `true` if the page needs a session. Every console page does.
    #[must_use]
    pub const fn requires_session(self) -> bool {
        true
    }

    /// Returns `true` if `state` may view this page.
    #[must_use]
    pub const fn is_accessible(self, state: &AuthState) -> bool {
        !self.requires_session() || state.is_authenticated
    }

    /// Returns where a visitor in `state` should be sent when asking for
    /// this page: the page itself, or [`LOGIN_PAGE_PATH`].
    #[must_use]
    pub const fn route_for(self, state: &AuthState) -> &'static str {
        if self.is_accessible(state) {
            self.path()
        } else {
            LOGIN_PAGE_PATH
        }
    }
}

impl fmt::Display for ConsolePage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// Error returned when a path names no console page.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("No console page at path '{path}'")]
pub struct UnknownPageError {
    /// The path that was looked up.
    pub path: String,
}

impl FromStr for ConsolePage {
    type Err = UnknownPageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_path(s).ok_or_else(|| UnknownPageError {
            path: s.to_string(),
        })
    }
}

/// A headline figure on the dashboard.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DashboardStat {
    /// Card title.
    pub title: &'static str,
    /// Displayed value.
    pub value: &'static str,
    /// Change against the previous period.
    pub change: &'static str,
}

const DASHBOARD_STATS: [DashboardStat; 4] = [
    DashboardStat {
        title: "Total Contacts",
        value: "2,543",
        change: "+12.5%",
    },
    DashboardStat {
        title: "Active Chats",
        value: "156",
        change: "+8.2%",
    },
    DashboardStat {
        title: "Campaigns",
        value: "23",
        change: "+3.1%",
    },
    DashboardStat {
        title: "Messages Sent",
        value: "12,845",
        change: "+23.5%",
    },
];

/// Dashboard card titles below the statistics.
pub const DASHBOARD_CARDS: [&str; 2] = ["Recent Activity", "Quick Actions"];

/// Returns the dashboard statistics.
///
/// The figures are placeholders until the console has a statistics endpoint.
#[must_use]
pub const fn dashboard_stats() -> &'static [DashboardStat] {
    &DASHBOARD_STATS
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{SessionToken, User};
    use crate::store::AuthEvent;
    use serde_json::json;

    fn signed_in() -> AuthState {
        AuthState::default().apply(AuthEvent::SessionRestored {
            user: User::from_value(json!({"id": 1})).unwrap(),
            token: SessionToken::new("tok").unwrap(),
        })
    }

    #[test]
    fn test_paths_round_trip() {
        for page in ConsolePage::ALL {
            assert_eq!(ConsolePage::from_path(page.path()), Some(page));
            assert_eq!(page.path().parse::<ConsolePage>(), Ok(page));
        }
    }

    #[test]
    fn test_from_path_tolerates_trailing_slash() {
        assert_eq!(
            ConsolePage::from_path("/templates/"),
            Some(ConsolePage::Templates)
        );
        assert_eq!(ConsolePage::from_path("/"), None);
        assert_eq!(ConsolePage::from_path("/login"), None);
    }

    #[test]
    fn test_unknown_path_error() {
        let err = "/settings".parse::<ConsolePage>().unwrap_err();
        assert_eq!(err.to_string(), "No console page at path '/settings'");
    }

    #[test]
    fn test_dashboard_has_no_action_or_search() {
        assert_eq!(ConsolePage::Dashboard.primary_action(), None);
        assert_eq!(ConsolePage::Dashboard.search_placeholder(), None);
        assert_eq!(
            ConsolePage::Campaigns.search_placeholder(),
            Some("Search campaigns...")
        );
        assert_eq!(ConsolePage::Templates.primary_action(), Some("New Template"));
    }

    #[test]
    fn test_pages_are_guarded() {
        let anonymous = AuthState::default();
        let signed_in = signed_in();

        for page in ConsolePage::ALL {
            assert!(page.requires_session());
            assert!(!page.is_accessible(&anonymous));
            assert!(page.is_accessible(&signed_in));
            assert_eq!(page.route_for(&anonymous), LOGIN_PAGE_PATH);
            assert_eq!(page.route_for(&signed_in), page.path());
        }
    }

    #[test]
    fn test_dashboard_stats() {
        let stats = dashboard_stats();
        assert_eq!(stats.len(), 4);
        assert_eq!(
            stats[0],
            DashboardStat {
                title: "Total Contacts",
                value: "2,543",
                change: "+12.5%",
            }
        );
        assert_eq!(stats[3].title, "Messages Sent");
        assert_eq!(stats[3].value, "12,845");
    }

    #[test]
    fn test_only_dashboard_has_cards() {
        assert_eq!(
            ConsolePage::Dashboard.cards(),
            &["Recent Activity", "Quick Actions"]
        );
        assert_eq!(ConsolePage::Dashboard.cards(), &DASHBOARD_CARDS);
        for page in [ConsolePage::Contacts, ConsolePage::Campaigns, ConsolePage::Templates] {
            assert!(page.cards().is_empty());
        }
    }

    #[test]
    fn test_display_uses_title() {
        assert_eq!(ConsolePage::Contacts.to_string(), "Contacts");
    }
}
