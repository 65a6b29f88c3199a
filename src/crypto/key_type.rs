//! Key roles and their nkeys prefix bytes.

use std::fmt;
use std::str::FromStr;

use nkeys::KeyPairType;

/// The role a key is issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyType {
    User,
    Account,
    Server,
    Cluster,
    Operator,
}

impl KeyType {
    /// Every supported key type.
    pub const ALL: [KeyType; 5] = [
        KeyType::User,
        KeyType::Account,
        KeyType::Server,
        KeyType::Cluster,
        KeyType::Operator,
    ];

    /// The collaborator's tag for this key type.
    pub fn pair_type(self) -> KeyPairType {
        match self {
            KeyType::User => KeyPairType::User,
            KeyType::Account => KeyPairType::Account,
            KeyType::Server => KeyPairType::Server,
            KeyType::Cluster => KeyPairType::Cluster,
            KeyType::Operator => KeyPairType::Operator,
        }
    }

    /// First character of a public key of this type.
    pub fn public_prefix(self) -> char {
        match self {
            KeyType::User => 'U',
            KeyType::Account => 'A',
            KeyType::Server => 'N',
            KeyType::Cluster => 'C',
            KeyType::Operator => 'O',
        }
    }
}

impl FromStr for KeyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "user" => Ok(KeyType::User),
            "account" => Ok(KeyType::Account),
            "server" => Ok(KeyType::Server),
            "cluster" => Ok(KeyType::Cluster),
            "operator" => Ok(KeyType::Operator),
            _ => Err(format!(
                "unknown key type '{}', expected one of user|account|server|cluster|operator",
                s
            )),
        }
    }
}

impl fmt::Display for KeyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyType::User => write!(f, "user"),
            KeyType::Account => write!(f, "account"),
            KeyType::Server => write!(f, "server"),
            KeyType::Cluster => write!(f, "cluster"),
            KeyType::Operator => write!(f, "operator"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("USER".parse::<KeyType>().unwrap(), KeyType::User);
        assert_eq!("Operator".parse::<KeyType>().unwrap(), KeyType::Operator);
    }

    #[test]
    fn test_unknown_type() {
        assert!("module".parse::<KeyType>().is_err());
        assert!("".parse::<KeyType>().is_err());
    }

    #[test]
    fn test_display_round_trips() {
        for kt in KeyType::ALL {
            assert_eq!(kt.to_string().parse::<KeyType>().unwrap(), kt);
        }
    }
}
