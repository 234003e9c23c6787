use std::{collections::HashMap, sync::Arc};

use serde_json::{Map, Value};
use tracing::{error, info};

use crate::{
    clients::{Directory, Localizer},
    error::OperationError,
    models::{
        entities::{Contractor, ContractorType, Employee, Reseller},
        notification::{NotificationResult, NotificationType},
        template::{TemplateData, TemplateDataBuilder},
        validation::{as_int_loose, as_string_loose, is_empty_value, validate_return_data},
    },
    service::{ClientNotifications, NotificationSendingService},
};

/// Handles a return-status change: validates the request, resolves the
/// involved entities, assembles template data and fans out employee and
/// client notifications.
///
/// The flow is linear and request-scoped. Channel-level send failures end up
/// in the result record; everything else is an `OperationError`.
pub struct ReturnOperation {
    directory: Arc<dyn Directory>,
    localizer: Arc<dyn Localizer>,
    sending: NotificationSendingService,
}

impl ReturnOperation {
    pub fn new(
        directory: Arc<dyn Directory>,
        localizer: Arc<dyn Localizer>,
        sending: NotificationSendingService,
    ) -> Self {
        Self {
            directory,
            localizer,
            sending,
        }
    }

    /// Runs the full notification flow for the raw `data` payload.
    ///
    /// Errors are logged once here and re-raised unchanged; the HTTP layer
    /// turns them into responses.
    pub async fn execute(
        &self,
        raw: &Map<String, Value>,
    ) -> Result<NotificationResult, OperationError> {
        match self.run(raw).await {
            Ok(result) => Ok(result),
            Err(e) => {
                error!(error = %e, "Error in return operation");
                Err(e)
            }
        }
    }

    async fn run(&self, raw: &Map<String, Value>) -> Result<NotificationResult, OperationError> {
        let validation = validate_return_data(raw);
        if !validation.is_valid {
            return Err(OperationError::Validation(validation.errors.join(", ")));
        }
        let data = validation.validated;

        let reseller_id = int_field(&data, "resellerId");
        let notification_type = NotificationType::from_code(int_field(&data, "notificationType"));

        let reseller = self.reseller(reseller_id).await?;
        let client = self.client(int_field(&data, "clientId"), reseller.id).await?;
        let creator = self.employee(int_field(&data, "creatorId"), "Creator").await?;
        let expert = self.employee(int_field(&data, "expertId"), "Expert").await?;

        let differences = raw.get("differences").and_then(Value::as_object);
        let differences_text = self
            .differences_text(notification_type, differences, reseller_id)
            .await?;

        let template_data = self.build_template_data(
            &data,
            &client,
            &creator,
            &expert,
            differences_text,
        )?;

        let employee_notified = self
            .sending
            .send_employee_notifications(reseller.id, &template_data)
            .await?;

        let new_status = differences
            .and_then(|d| d.get("to"))
            .filter(|to| !is_empty_value(to))
            .and_then(as_int_loose);

        let mut client_result = ClientNotifications::default();

        if notification_type == Some(NotificationType::Change) {
            if let Some(new_status) = new_status {
                client_result = self
                    .sending
                    .send_client_notifications(reseller.id, &client, &template_data, new_status)
                    .await?;
            }
        }

        let result = NotificationResult {
            notification_employee_by_email: employee_notified,
            notification_client_by_email: client_result.email,
            notification_client_by_sms: client_result.sms,
        };

        info!(
            reseller_id = reseller.id,
            client_id = client.id,
            employee_email = result.notification_employee_by_email,
            client_email = result.notification_client_by_email,
            client_sms = result.notification_client_by_sms.is_sent,
            "Return notification flow completed"
        );

        Ok(result)
    }

    async fn reseller(&self, reseller_id: i64) -> Result<Reseller, OperationError> {
        self.directory
            .reseller_by_id(reseller_id)
            .await?
            .ok_or_else(|| OperationError::NotFound("Reseller not found!".to_string()))
    }

    async fn client(&self, client_id: i64, reseller_id: i64) -> Result<Contractor, OperationError> {
        let client = self
            .directory
            .contractor_by_id(client_id)
            .await?
            .ok_or_else(|| OperationError::NotFound("Client not found!".to_string()))?;

        if client.contractor_type != ContractorType::Customer || client.reseller_id != reseller_id {
            return Err(OperationError::NotFound("Client not found!".to_string()));
        }

        Ok(client)
    }

    async fn employee(&self, employee_id: i64, role: &str) -> Result<Employee, OperationError> {
        self.directory
            .employee_by_id(employee_id)
            .await?
            .ok_or_else(|| OperationError::NotFound(format!("{} not found!", role)))
    }

    async fn differences_text(
        &self,
        notification_type: Option<NotificationType>,
        differences: Option<&Map<String, Value>>,
        reseller_id: i64,
    ) -> Result<String, OperationError> {
        match notification_type {
            Some(NotificationType::New) => {
                let text = self
                    .localizer
                    .localize("NewPositionAdded", None, reseller_id)
                    .await?;
                Ok(text)
            }
            Some(NotificationType::Change) => {
                let Some(differences) = differences.filter(|d| !d.is_empty()) else {
                    return Ok(String::new());
                };

                let from = differences.get("from").and_then(as_int_loose).unwrap_or(0);
                let to = differences.get("to").and_then(as_int_loose).unwrap_or(0);

                let params = HashMap::from([
                    ("FROM".to_string(), self.localizer.status_name(from).await?),
                    ("TO".to_string(), self.localizer.status_name(to).await?),
                ]);

                let text = self
                    .localizer
                    .localize("PositionStatusHasChanged", Some(&params), reseller_id)
                    .await?;
                Ok(text)
            }
            None => Ok(String::new()),
        }
    }

    fn build_template_data(
        &self,
        data: &Map<String, Value>,
        client: &Contractor,
        creator: &Employee,
        expert: &Employee,
        differences_text: String,
    ) -> Result<TemplateData, OperationError> {
        TemplateDataBuilder::new()
            .set_complaint(
                int_field(data, "complaintId"),
                string_field(data, "complaintNumber"),
            )
            .set_creator(creator)
            .set_expert(expert)
            .set_client(client)
            .set_consumption(
                int_field(data, "consumptionId"),
                string_field(data, "consumptionNumber"),
            )
            .set_agreement(string_field(data, "agreementNumber"))
            .set_date(string_field(data, "date"))
            .set_differences(differences_text)
            .build()
    }
}

fn int_field(data: &Map<String, Value>, field: &str) -> i64 {
    data.get(field).and_then(as_int_loose).unwrap_or(0)
}

fn string_field(data: &Map<String, Value>, field: &str) -> String {
    data.get(field).and_then(as_string_loose).unwrap_or_default()
}
