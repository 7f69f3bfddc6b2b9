use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// The resource pools a client sends along with every request and gets back
/// (possibly modified) in the response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Pools {
    /// Not interpreted here, only handed back.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub cards: Vec<String>,
    #[serde(default)]
    pub emails: EmailPools,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "IncomingEmailPools")]
pub struct EmailPools {
    pub main: Vec<String>,
    pub pump_20off25: Vec<String>,
    pub pump_25off: Vec<String>,
}

/// Older clients sent a bare list of emails; it becomes the main pool.
#[derive(Deserialize)]
#[serde(untagged)]
enum IncomingEmailPools {
    Missing,
    Legacy(Vec<String>),
    Named {
        #[serde(default, deserialize_with = "null_as_empty")]
        main: Vec<String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pump_20off25: Vec<String>,
        #[serde(default, deserialize_with = "null_as_empty")]
        pump_25off: Vec<String>,
    },
}

/// Clients send `null` for pools they never filled.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Vec<String>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

impl From<IncomingEmailPools> for EmailPools {
    fn from(incoming: IncomingEmailPools) -> Self {
        match incoming {
            IncomingEmailPools::Missing => Self::default(),
            IncomingEmailPools::Legacy(main) => Self {
                main,
                ..Self::default()
            },
            IncomingEmailPools::Named {
                main,
                pump_20off25,
                pump_25off,
            } => Self {
                main,
                pump_20off25,
                pump_25off,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailPool {
    Main,
    Pump20Off25,
    Pump25Off,
}

impl EmailPool {
    pub const ALL: [EmailPool; 3] = [EmailPool::Main, EmailPool::Pump20Off25, EmailPool::Pump25Off];

    pub fn name(self) -> &'static str {
        match self {
            EmailPool::Main => "main",
            EmailPool::Pump20Off25 => "pump_20off25",
            EmailPool::Pump25Off => "pump_25off",
        }
    }
}

impl FromStr for EmailPool {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EmailPool::ALL
            .into_iter()
            .find(|pool| pool.name() == s)
            .ok_or(())
    }
}

impl fmt::Display for EmailPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl EmailPools {
    pub fn get(&self, pool: EmailPool) -> &Vec<String> {
        match pool {
            EmailPool::Main => &self.main,
            EmailPool::Pump20Off25 => &self.pump_20off25,
            EmailPool::Pump25Off => &self.pump_25off,
        }
    }

    pub fn get_mut(&mut self, pool: EmailPool) -> &mut Vec<String> {
        match pool {
            EmailPool::Main => &mut self.main,
            EmailPool::Pump20Off25 => &mut self.pump_20off25,
            EmailPool::Pump25Off => &mut self.pump_25off,
        }
    }

    /// Removes the first occurrence of `email`. Returns whether it was there.
    pub fn remove(&mut self, pool: EmailPool, email: &str) -> bool {
        let entries = self.get_mut(pool);
        match entries.iter().position(|entry| entry == email) {
            Some(position) => {
                entries.remove(position);
                true
            }
            None => false,
        }
    }
}
