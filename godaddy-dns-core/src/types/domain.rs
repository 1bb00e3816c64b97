use serde::{Deserialize, Serialize};

use godaddy_dns_provider::{Contact, DomainContactSet, DomainContacts, DomainDetail, DomainUpdate};

/// Desired registrar settings for a domain.
///
/// `None` leaves the setting as the registrar has it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locked: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub renew_auto: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_servers: Option<Vec<String>>,
    #[serde(default)]
    pub contacts: DomainContacts,
}

impl DomainSettings {
    /// Domain fields that differ from `current`. Empty when nothing needs to be sent.
    #[must_use]
    pub fn domain_changes(&self, current: &DomainDetail) -> DomainUpdate {
        let mut update = DomainUpdate::default();

        if let Some(locked) = self.locked
            && locked != current.summary.locked
        {
            update.locked = Some(locked);
        }
        if let Some(renew_auto) = self.renew_auto
            && renew_auto != current.summary.renew_auto
        {
            update.renew_auto = Some(renew_auto);
        }
        if let Some(name_servers) = &self.name_servers
            && !same_name_servers(name_servers, &current.name_servers)
        {
            update.name_servers = Some(name_servers.clone());
        }

        update
    }

    /// Contacts that differ from `current`. Empty when nothing needs to be sent.
    #[must_use]
    pub fn contact_changes(&self, current: &DomainContactSet) -> DomainContacts {
        changed_contacts(&self.contacts, current)
    }
}

/// Contacts in `desired` that differ from `current`.
pub(crate) fn changed_contacts(
    desired: &DomainContacts,
    current: &DomainContactSet,
) -> DomainContacts {
    fn changed(desired: Option<&Contact>, current: &Contact) -> Option<Contact> {
        desired.filter(|c| !same_contact(c, current)).cloned()
    }

    DomainContacts {
        contact_admin: changed(desired.contact_admin.as_ref(), &current.contact_admin),
        contact_billing: changed(desired.contact_billing.as_ref(), &current.contact_billing),
        contact_registrant: changed(
            desired.contact_registrant.as_ref(),
            &current.contact_registrant,
        ),
        contact_tech: changed(desired.contact_tech.as_ref(), &current.contact_tech),
    }
}

/// Contact equality where an empty optional field equals an absent one.
///
/// The registrar reports unset optional fields as `""`.
fn same_contact(a: &Contact, b: &Contact) -> bool {
    fn same_opt(a: Option<&String>, b: Option<&String>) -> bool {
        a.map_or("", String::as_str) == b.map_or("", String::as_str)
    }

    let (x, y) = (&a.address_mailing, &b.address_mailing);
    a.name_first == b.name_first
        && same_opt(a.name_middle.as_ref(), b.name_middle.as_ref())
        && a.name_last == b.name_last
        && same_opt(a.organization.as_ref(), b.organization.as_ref())
        && same_opt(a.job_title.as_ref(), b.job_title.as_ref())
        && a.email == b.email
        && a.phone == b.phone
        && same_opt(a.fax.as_ref(), b.fax.as_ref())
        && x.address1 == y.address1
        && same_opt(x.address2.as_ref(), y.address2.as_ref())
        && x.city == y.city
        && x.state == y.state
        && x.postal_code == y.postal_code
        && x.country == y.country
}

/// Ordered comparison ignoring case and a trailing dot.
fn same_name_servers(desired: &[String], current: &[String]) -> bool {
    fn normalize(ns: &str) -> String {
        ns.trim().trim_end_matches('.').to_lowercase()
    }

    desired.len() == current.len()
        && desired
            .iter()
            .zip(current)
            .all(|(a, b)| normalize(a) == normalize(b))
}
