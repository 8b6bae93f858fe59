use folio_protocol::ContactMessage;

/// Minimum accepted name length.
pub const NAME_MIN_LEN: usize = 2;
/// Minimum accepted message length.
pub const MESSAGE_MIN_LEN: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactField {
    Name,
    Email,
    Message,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssue {
    Required,
    TooShort { min: usize },
    InvalidEmail,
}

/// One failed rule on one field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContactFieldError {
    pub field: ContactField,
    pub issue: ValidationIssue,
}

/// Validate a contact-form submission.
///
/// Returns every failed rule (at most one per field); an empty vec
/// means the message may be handed to whatever dispatches it. Never
/// panics — validation is the only gate, not an assertion.
pub fn validate_contact(message: &ContactMessage) -> Vec<ContactFieldError> {
    let mut errors = Vec::new();

    let name = message.name.trim();
    if name.is_empty() {
        errors.push(ContactFieldError {
            field: ContactField::Name,
            issue: ValidationIssue::Required,
        });
    } else if name.chars().count() < NAME_MIN_LEN {
        errors.push(ContactFieldError {
            field: ContactField::Name,
            issue: ValidationIssue::TooShort { min: NAME_MIN_LEN },
        });
    }

    let email = message.email.trim();
    if email.is_empty() {
        errors.push(ContactFieldError {
            field: ContactField::Email,
            issue: ValidationIssue::Required,
        });
    } else if !is_plausible_email(email) {
        errors.push(ContactFieldError {
            field: ContactField::Email,
            issue: ValidationIssue::InvalidEmail,
        });
    }

    let body = message.message.trim();
    if body.is_empty() {
        errors.push(ContactFieldError {
            field: ContactField::Message,
            issue: ValidationIssue::Required,
        });
    } else if body.chars().count() < MESSAGE_MIN_LEN {
        errors.push(ContactFieldError {
            field: ContactField::Message,
            issue: ValidationIssue::TooShort {
                min: MESSAGE_MIN_LEN,
            },
        });
    }

    errors
}

/// Form-validator level plausibility, not RFC 5322: one `@` with a
/// non-empty local part and a dot somewhere past the first character of
/// the domain.
fn is_plausible_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.find('.') {
        Some(pos) => pos > 0 && pos < domain.len() - 1,
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(name: &str, email: &str, body: &str) -> ContactMessage {
        ContactMessage {
            name: name.into(),
            email: email.into(),
            message: body.into(),
        }
    }

    #[test]
    fn valid_message_has_no_errors() {
        let m = message("Ada", "ada@example.com", "I would like to collaborate.");
        assert!(validate_contact(&m).is_empty());
    }

    #[test]
    fn each_rule_triggers_individually() {
        let short_name = message("A", "ada@example.com", "I would like to collaborate.");
        assert_eq!(
            validate_contact(&short_name),
            vec![ContactFieldError {
                field: ContactField::Name,
                issue: ValidationIssue::TooShort { min: NAME_MIN_LEN },
            }]
        );

        let bad_email = message("Ada", "not-an-email", "I would like to collaborate.");
        assert_eq!(
            validate_contact(&bad_email),
            vec![ContactFieldError {
                field: ContactField::Email,
                issue: ValidationIssue::InvalidEmail,
            }]
        );

        let short_body = message("Ada", "ada@example.com", "Hi");
        assert_eq!(
            validate_contact(&short_body),
            vec![ContactFieldError {
                field: ContactField::Message,
                issue: ValidationIssue::TooShort {
                    min: MESSAGE_MIN_LEN,
                },
            }]
        );
    }

    #[test]
    fn empty_fields_report_required() {
        let errors = validate_contact(&message("", "  ", ""));
        assert_eq!(errors.len(), 3);
        assert!(errors
            .iter()
            .all(|e| e.issue == ValidationIssue::Required));
    }

    #[test]
    fn email_plausibility_edges() {
        assert!(is_plausible_email("a@b.co"));
        assert!(!is_plausible_email("@b.co"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a@.co"));
        assert!(!is_plausible_email("a@b."));
        assert!(!is_plausible_email("a@@b.co"));
    }
}
