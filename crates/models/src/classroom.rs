use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Equipment {
    Basic,
    Multimedia,
    Lab,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classroom {
    #[serde(rename = "classroomId")]
    pub id: i32,
    pub building: String,
    pub room_number: String,
    pub capacity: u32,
    pub equipment: Equipment,
}

impl Classroom {
    /// e.g. "Teaching Building A 101"
    pub fn label(&self) -> String {
        format!("{} {}", self.building, self.room_number)
    }
}
