use crate::{
    api::{Inquiry, InquiryStatus, SendEmailRequest},
    utils::filters::is_valid_email,
};

pub const MAX_MESSAGE_CHARS: usize = 2000;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Empty when the visitor has no preferred club.
    pub club_id: String,
    pub message: String,
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

impl ContactForm {
    pub fn to_inquiry(&self) -> Result<Inquiry, String> {
        let name = non_blank(&self.name).ok_or("Please tell us your name")?;
        let email = self.email.trim().to_lowercase();
        if !is_valid_email(&email) {
            return Err("Enter a valid email address".into());
        }
        let message = non_blank(&self.message).ok_or("Please write a message")?;
        if message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(format!(
                "Messages are limited to {} characters",
                MAX_MESSAGE_CHARS
            ));
        }
        Ok(Inquiry {
            id: String::new(),
            name,
            email,
            phone: non_blank(&self.phone),
            club_id: non_blank(&self.club_id),
            message,
            status: InquiryStatus::New,
            created_date: None,
        })
    }
}

pub fn acknowledgment_email(inquiry: &Inquiry, club_name: Option<&str>) -> SendEmailRequest {
    let club_line = club_name
        .map(|club| format!(" The team at {} will get back to you.", club))
        .unwrap_or_else(|| " Our team will get back to you shortly.".to_string());
    SendEmailRequest {
        to: inquiry.email.clone(),
        subject: "We received your message".into(),
        body: format!(
            "Hi {},\n\nThanks for contacting Ironhall.{}\n\nYour message:\n{}",
            inquiry.name, club_line, inquiry.message
        ),
        from_name: Some("Ironhall".into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: " Dana ".into(),
            email: "Dana@Example.com".into(),
            phone: "".into(),
            club_id: "club-1".into(),
            message: "Do you have a trial week?".into(),
        }
    }

    #[test]
    fn builds_new_inquiry_from_trimmed_fields() {
        let inquiry = form().to_inquiry().unwrap();
        assert_eq!(inquiry.name, "Dana");
        assert_eq!(inquiry.email, "dana@example.com");
        assert_eq!(inquiry.phone, None);
        assert_eq!(inquiry.club_id.as_deref(), Some("club-1"));
        assert_eq!(inquiry.status, InquiryStatus::New);
    }

    #[test]
    fn rejects_missing_or_oversized_fields() {
        let no_name = ContactForm { name: "  ".into(), ..form() };
        assert!(no_name.to_inquiry().is_err());
        let bad_email = ContactForm { email: "dana".into(), ..form() };
        assert_eq!(
            bad_email.to_inquiry().unwrap_err(),
            "Enter a valid email address"
        );
        let long = ContactForm {
            message: "x".repeat(MAX_MESSAGE_CHARS + 1),
            ..form()
        };
        assert!(long.to_inquiry().is_err());
    }

    #[test]
    fn acknowledgment_goes_to_visitor() {
        let inquiry = form().to_inquiry().unwrap();
        let email = acknowledgment_email(&inquiry, Some("Ironhall Central"));
        assert_eq!(email.to, "dana@example.com");
        assert!(email.body.contains("Hi Dana"));
        assert!(email.body.contains("Ironhall Central"));
        assert!(email.body.contains("trial week"));
    }
}
