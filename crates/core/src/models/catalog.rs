use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trainer {
    pub id: i32,
    pub name: String,
    pub specialization: Option<String>,
    pub description: Option<String>,
    pub photo: Option<String>,
}

/// How a service is sold: one client per slot, or a seat in a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceType {
    Individual,
    Group,
}

impl ServiceType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Individual => "individual",
            ServiceType::Group => "group",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "individual" => Some(ServiceType::Individual),
            "group" => Some(ServiceType::Group),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Service {
    pub id: i32,
    pub name: String,
    /// Duration in minutes
    pub duration: i32,
    pub description: Option<String>,
    pub price: i32,
    #[serde(rename = "type")]
    pub service_type: ServiceType,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GroupClass {
    pub id: i32,
    pub name: String,
    /// Duration in minutes
    pub duration: i32,
    pub description: Option<String>,
    pub price: i32,
}
