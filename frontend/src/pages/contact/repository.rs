use std::rc::Rc;

use crate::api::{ApiClient, ApiError, Club, Inquiry};

use super::utils::acknowledgment_email;

#[derive(Clone)]
pub struct ContactRepository {
    client: Rc<ApiClient>,
}

impl ContactRepository {
    pub fn new_with_client(client: Rc<ApiClient>) -> Self {
        Self { client }
    }

    /// Active clubs in display order, for the "preferred club" select.
    pub async fn fetch_clubs(&self) -> Result<Vec<Club>, ApiError> {
        let clubs: Vec<Club> = self.client.list(Some("order"), None).await?;
        Ok(clubs.into_iter().filter(|club| club.is_active).collect())
    }

    /// Stores the inquiry, then acknowledges it by email. A failed email does
    /// not fail the submission once the inquiry is saved.
    pub async fn submit(
        &self,
        inquiry: &Inquiry,
        club_name: Option<&str>,
    ) -> Result<Inquiry, ApiError> {
        let saved = self.client.create(inquiry).await?;
        if let Err(err) = self
            .client
            .send_email(&acknowledgment_email(&saved, club_name))
            .await
        {
            log::warn!("inquiry {} saved but acknowledgment failed: {}", saved.id, err);
        }
        Ok(saved)
    }
}
