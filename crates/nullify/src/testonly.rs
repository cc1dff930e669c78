//! Test-only functionality shared among multiple test modules.

use std::collections::{BTreeMap, HashMap};

use crate::Describe;

#[derive(Debug, Default, Describe)]
#[describe(crate = crate)]
pub(crate) struct Person {
    #[describe(tag(json = "name", validate = "required"))]
    pub name: String,
    #[describe(tag(json = "age,omitempty", validate = "omitnil,max=150"))]
    pub age: u32,
    #[describe(tag(json = "email", validate = "omitnil,email"))]
    pub email: Option<String>,
    #[describe(tag(json = "-"))]
    pub internal: String,
}

#[derive(Debug, Default, Describe)]
#[describe(crate = crate)]
pub(crate) struct Inventory {
    pub tags: Vec<String>,
    pub counts: HashMap<String, u32>,
    pub by_id: BTreeMap<i64, String>,
    pub checksum: [u8; 4],
}

#[derive(Debug, Default, Describe)]
#[describe(crate = crate, rename = "Team")]
pub(crate) struct TeamConfig {
    #[describe(tag(json = "lead", validate = "required"))]
    pub lead: Person,
    #[describe(tag(json = "members", validate = "omitnil,max=3"))]
    pub members: Vec<Person>,
    #[describe(tag(json = "aliases"))]
    pub aliases: HashMap<String, Option<Box<Person>>>,
}
