//! Client identifiers and the configured roster of allowed clients.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The reference client list, in configured order.
pub const DEFAULT_CLIENTS: [&str; 12] = [
    "Boathouse Row I",
    "Boathouse Row II",
    "PMSMF",
    "PMSF",
    "PMSF(L)",
    "PMSF US LP",
    "Tewks",
    "CitcoOne",
    "Admin",
    "Training",
    "AOL",
    "NPIC",
];

/// Errors raised when naming a client.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClientError {
    /// The client name was empty or whitespace.
    #[error("client name cannot be empty")]
    Empty,

    /// The client is not part of the configured roster.
    #[error("unknown client: {name}")]
    UnknownClient { name: String },

    /// A roster needs at least one client.
    #[error("client roster cannot be empty")]
    EmptyRoster,
}

/// A validated client name.
///
/// Names are case-sensitive and kept exactly as configured.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Client(String);

impl Client {
    /// Creates a client name after validation.
    pub fn new(name: impl Into<String>) -> Result<Self, ClientError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(ClientError::Empty);
        }
        Ok(Self(name))
    }

    /// Returns the name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Client {
    type Error = ClientError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Client> for String {
    fn from(client: Client) -> Self {
        client.0
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Client {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// The fixed, ordered set of clients time may be booked against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRoster {
    clients: Vec<Client>,
}

impl ClientRoster {
    /// Builds a roster from configured names.
    ///
    /// Duplicates are dropped, keeping the first occurrence.
    pub fn new<I, S>(names: I) -> Result<Self, ClientError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut clients: Vec<Client> = Vec::new();
        for name in names {
            let client = Client::new(name)?;
            if !clients.contains(&client) {
                clients.push(client);
            }
        }
        if clients.is_empty() {
            return Err(ClientError::EmptyRoster);
        }
        Ok(Self { clients })
    }

    /// Clients in configured order.
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    /// Clients sorted for presentation.
    pub fn sorted(&self) -> Vec<&Client> {
        let mut sorted: Vec<&Client> = self.clients.iter().collect();
        sorted.sort();
        sorted
    }

    /// Whether `name` is exactly one of the configured clients.
    pub fn contains(&self, name: &str) -> bool {
        self.clients.iter().any(|c| c.as_str() == name)
    }

    /// Looks up a configured client by exact name.
    pub fn resolve(&self, name: &str) -> Result<Client, ClientError> {
        self.clients
            .iter()
            .find(|c| c.as_str() == name)
            .cloned()
            .ok_or_else(|| ClientError::UnknownClient {
                name: name.to_string(),
            })
    }
}

impl Default for ClientRoster {
    fn default() -> Self {
        Self {
            clients: DEFAULT_CLIENTS
                .iter()
                .map(|name| Client((*name).to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_rejects_blank_names() {
        assert_eq!(Client::new(""), Err(ClientError::Empty));
        assert_eq!(Client::new("   "), Err(ClientError::Empty));
        assert!(Client::new("Admin").is_ok());
    }

    #[test]
    fn client_serde_roundtrip() {
        let client = Client::new("PMSF(L)").unwrap();
        let json = serde_json::to_string(&client).unwrap();
        assert_eq!(json, "\"PMSF(L)\"");
        let parsed: Client = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, client);
    }

    #[test]
    fn client_serde_rejects_empty() {
        let result: Result<Client, _> = serde_json::from_str("\"\"");
        assert!(result.is_err());
    }

    #[test]
    fn default_roster_has_reference_clients() {
        let roster = ClientRoster::default();
        assert_eq!(roster.clients().len(), 12);
        assert_eq!(roster.clients()[0].as_str(), "Boathouse Row I");
        assert!(roster.contains("NPIC"));
    }

    #[test]
    fn sorted_roster_is_alphabetical() {
        let roster = ClientRoster::default();
        let sorted: Vec<&str> = roster.sorted().iter().map(|c| c.as_str()).collect();
        assert_eq!(
            sorted,
            vec![
                "AOL",
                "Admin",
                "Boathouse Row I",
                "Boathouse Row II",
                "CitcoOne",
                "NPIC",
                "PMSF",
                "PMSF US LP",
                "PMSF(L)",
                "PMSMF",
                "Tewks",
                "Training",
            ]
        );
    }

    #[test]
    fn resolve_is_case_sensitive() {
        let roster = ClientRoster::default();
        assert_eq!(roster.resolve("Admin").unwrap().as_str(), "Admin");
        assert_eq!(
            roster.resolve("admin"),
            Err(ClientError::UnknownClient {
                name: "admin".to_string()
            })
        );
    }

    #[test]
    fn roster_drops_duplicates_and_rejects_empty() {
        let roster = ClientRoster::new(["Admin", "AOL", "Admin"]).unwrap();
        assert_eq!(roster.clients().len(), 2);

        let empty: [&str; 0] = [];
        assert_eq!(ClientRoster::new(empty), Err(ClientError::EmptyRoster));
        assert_eq!(ClientRoster::new(["Admin", ""]), Err(ClientError::Empty));
    }
}
