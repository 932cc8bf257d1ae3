//! Business rules for contacts.
//!
//! Every check here is a pure function over the domain model with an explicit
//! `now`, so rules can be exercised without any storage behind them. Checks
//! short-circuit: the first failing rule is reported and nothing is aggregated.

use super::errors::ValidationError;
use crate::models::Contact;
use chrono::{DateTime, Utc};

pub const CONTACT_REQUIRED: &str = "Contact is a required field";
pub const FIRST_NAME_REQUIRED: &str = "FirstName is a required field";
pub const LAST_NAME_REQUIRED: &str = "LastName is a required field";
pub const EMAIL_ADDRESS_REQUIRED: &str = "EmailAddress is a required field";
pub const BIRTHDAY_IN_FUTURE: &str = "The birthday can not be in the future";
pub const ANNIVERSARY_IN_FUTURE: &str = "The anniversary can not be in the future";
pub const ANNIVERSARY_BEFORE_BIRTHDAY: &str =
    "The anniversary can not be earlier than the birthday.";

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, str::is_empty)
}

fn required(value: Option<&str>, param: &str, message: &str) -> Result<(), ValidationError> {
    if is_blank(value) {
        return Err(ValidationError::missing(param, message));
    }
    Ok(())
}

/// Validate the parameters of a search by name.
///
/// `firstName` is checked before `lastName`, so a request missing both
/// reports `firstName`.
pub fn validate_name_search(
    first_name: Option<&str>,
    last_name: Option<&str>,
) -> Result<(), ValidationError> {
    required(first_name, "firstName", FIRST_NAME_REQUIRED)?;
    required(last_name, "lastName", LAST_NAME_REQUIRED)?;
    Ok(())
}

/// Validate a contact before it is saved.
///
/// Order: contact -> FirstName -> LastName -> EmailAddress -> birthday in future
/// -> anniversary in future -> anniversary before birthday.
pub fn validate_contact(
    contact: Option<&Contact>,
    now: DateTime<Utc>,
) -> Result<(), ValidationError> {
    let contact = contact.ok_or_else(|| ValidationError::missing("contact", CONTACT_REQUIRED))?;

    required(contact.first_name.as_deref(), "FirstName", FIRST_NAME_REQUIRED)?;
    required(contact.last_name.as_deref(), "LastName", LAST_NAME_REQUIRED)?;
    required(
        contact.email_address.as_deref(),
        "EmailAddress",
        EMAIL_ADDRESS_REQUIRED,
    )?;

    if let Some(birthday) = contact.birthday {
        if birthday > now {
            return Err(ValidationError::out_of_range(
                "Birthday",
                birthday,
                BIRTHDAY_IN_FUTURE,
            ));
        }
    }

    if let Some(anniversary) = contact.anniversary {
        if anniversary > now {
            return Err(ValidationError::out_of_range(
                "Anniversary",
                anniversary,
                ANNIVERSARY_IN_FUTURE,
            ));
        }

        if let Some(birthday) = contact.birthday {
            if anniversary < birthday {
                return Err(ValidationError::out_of_range(
                    "Anniversary",
                    anniversary,
                    ANNIVERSARY_BEFORE_BIRTHDAY,
                ));
            }
        }
    }

    Ok(())
}

/// Validate a contact before it is deleted.
///
/// Only presence is checked today. Returns `false` rather than an error so the
/// caller can report "nothing deleted" without raising.
pub fn validate_delete(contact: Option<&Contact>) -> bool {
    contact.is_some()
}
