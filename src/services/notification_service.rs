// src/services/notification_service.rs

use uuid::Uuid;

use crate::{
    common::error::AppError,
    db::NotificationRepository,
    models::{
        client::{Client, NotificationSettings},
        notification::{Notification, NotificationKind, RecipientKind, ReferenceModel},
    },
};

const DEFAULT_EMAIL_TEMPLATE: &str =
    "Olá {{name}}, seja bem-vindo(a)! Seu cadastro com o e-mail {{email}} foi concluído.";
const DEFAULT_SMS_TEMPLATE: &str = "Olá {{name}}, seu cadastro no escritório foi concluído.";

// Substituição simples de placeholders {{chave}}
pub fn render_template(template: &str, values: &[(&str, &str)]) -> String {
    let mut rendered = template.to_string();
    for (key, value) in values {
        rendered = rendered.replace(&format!("{{{{{}}}}}", key), value);
    }
    rendered
}

#[derive(Clone)]
pub struct NotificationService {
    repo: NotificationRepository,
}

impl NotificationService {
    pub fn new(repo: NotificationRepository) -> Self {
        Self { repo }
    }

    pub async fn notify(
        &self,
        recipient_id: Uuid,
        recipient_kind: RecipientKind,
        title: &str,
        message: &str,
        kind: NotificationKind,
        reference: Option<(ReferenceModel, Uuid)>,
    ) -> Result<Notification, AppError> {
        self.repo
            .create(recipient_id, recipient_kind, title, message, kind, reference)
            .await
    }

    // Boas-vindas após a criação de um cliente. O "envio" de e-mail/SMS é
    // um stub que apenas registra no log.
    pub async fn welcome_client(
        &self,
        client: &Client,
        settings: &NotificationSettings,
    ) -> Result<(), AppError> {
        let values = [
            ("name", client.name.as_str()),
            ("email", client.email.as_str()),
            ("company", client.company.as_deref().unwrap_or("")),
        ];

        let message = render_template(
            settings
                .email_template
                .as_deref()
                .unwrap_or(DEFAULT_EMAIL_TEMPLATE),
            &values,
        );

        self.repo
            .create(
                client.id,
                RecipientKind::Client,
                "Bem-vindo(a)",
                &message,
                NotificationKind::System,
                None,
            )
            .await?;

        if settings.send_email {
            tracing::info!("📧 E-mail de boas-vindas para {}: {}", client.email, message);
        }

        if settings.send_sms {
            let sms = render_template(
                settings
                    .sms_template
                    .as_deref()
                    .unwrap_or(DEFAULT_SMS_TEMPLATE),
                &values,
            );
            let mobile = client.mobile.as_deref().unwrap_or("(sem celular)");
            tracing::info!("📱 SMS de boas-vindas para {}: {}", mobile, sms);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn placeholders_are_substituted() {
        let rendered = render_template(
            "Olá {{name}}, confirme {{email}}.",
            &[("name", "Ana"), ("email", "ana@x.com")],
        );
        assert_eq!(rendered, "Olá Ana, confirme ana@x.com.");
    }

    #[test]
    fn unknown_placeholders_stay_verbatim() {
        let rendered = render_template("Olá {{name}} {{sobrenome}}", &[("name", "Ana")]);
        assert_eq!(rendered, "Olá Ana {{sobrenome}}");
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let rendered = render_template("{{name}} e {{name}}", &[("name", "Ana")]);
        assert_eq!(rendered, "Ana e Ana");
    }
}
