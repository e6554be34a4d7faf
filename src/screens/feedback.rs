use crate::{
    entities::{Feedback, FEEDBACK_COLLECTION},
    external::RecordStore,
    screens::Alert,
};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedbackForm {
    pub name: String,
    pub email: String,
    pub feedback: String,
}

impl FeedbackForm {
    fn record(&self) -> Feedback {
        Feedback {
            name: self.name.clone(),
            email: self.email.clone(),
            feedback: self.feedback.clone(),
        }
    }

    /// Appends the form to the feedback collection.
    ///
    /// Fields are cleared only after the store acknowledged the record, so a
    /// failed submission can be retried as is.
    #[tracing::instrument(skip(self, store))]
    pub async fn submit(&mut self, store: &dyn RecordStore) -> Alert {
        let record = self.record();

        if !record.is_complete() {
            return Alert::error("Please fill out all fields.");
        }

        let value = match serde_json::to_value(&record) {
            Ok(value) => value,
            Err(err) => {
                tracing::error!("could not encode feedback: {}", err);
                return Alert::error("Could not submit feedback. Please try again.");
            }
        };

        match store.append_record(FEEDBACK_COLLECTION, value).await {
            Ok(key) => {
                tracing::info!(%key, "feedback stored");
                *self = Self::default();
                Alert::success("Thank you for your feedback!")
            }
            Err(err) => {
                tracing::error!("could not store feedback: {}", err);
                Alert::error("Could not submit feedback. Please try again.")
            }
        }
    }
}
