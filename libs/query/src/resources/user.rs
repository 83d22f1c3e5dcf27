//! User accounts (staff and parents).

use super::{discrete, insert_eq, BuildFilter};
use crate::filter::Filter;
use crate::keyword::apply_keyword;
use crate::params::{QueryParameters, RawQuery};

const TEXT_FIELDS: &[&str] = &["fullName", "email", "phone"];

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserQuery {
    pub params: QueryParameters,
    pub role_id: Option<String>,
    pub gender: Option<String>,
    pub status: Option<String>,
}

impl UserQuery {
    pub fn from_raw(raw: &RawQuery) -> Self {
        Self {
            params: QueryParameters::from_raw(raw),
            role_id: discrete(raw, "roleId"),
            gender: discrete(raw, "gender"),
            status: discrete(raw, "status"),
        }
    }
}

impl BuildFilter for UserQuery {
    fn params(&self) -> &QueryParameters {
        &self.params
    }

    fn build_filter(&self) -> Filter {
        let mut filter = Filter::new();
        apply_keyword(&mut filter, self.params.keyword(), TEXT_FIELDS);
        insert_eq(&mut filter, "roleId", self.role_id.as_deref());
        insert_eq(&mut filter, "gender", self.gender.as_deref());
        insert_eq(&mut filter, "status", self.status.as_deref());
        filter
    }
}
