// src/services/upload_service.rs

use std::path::PathBuf;
use uuid::Uuid;

use crate::common::error::AppError;

// Limites do upload de foto de perfil
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

const PROFILE_IMAGE_DIR: &str = "profile-images";
const PUBLIC_PREFIX: &str = "/uploads";

// MIME aceitos e a extensão gravada em disco
pub fn extension_for(content_type: &str) -> Option<&'static str> {
    match content_type {
        "image/jpeg" | "image/jpg" => Some("jpg"),
        "image/png" => Some("png"),
        "image/gif" => Some("gif"),
        _ => None,
    }
}

pub fn validate_image(content_type: &str, size: usize) -> Result<&'static str, AppError> {
    let extension = extension_for(content_type).ok_or_else(|| {
        AppError::UploadError(format!(
            "Tipo de imagem '{}' não suportado. Use jpeg, jpg, png ou gif.",
            content_type
        ))
    })?;

    if size > MAX_IMAGE_BYTES {
        return Err(AppError::UploadError(
            "A imagem excede o limite de 5MB.".to_string(),
        ));
    }

    Ok(extension)
}

#[derive(Clone)]
pub struct UploadService {
    upload_dir: PathBuf,
}

impl UploadService {
    pub fn new(upload_dir: PathBuf) -> Self {
        Self { upload_dir }
    }

    // Grava a imagem em disco e devolve o caminho público
    // (/uploads/profile-images/<uuid>.<ext>). A escrita acontece antes do
    // INSERT/UPDATE no banco; falha parcial deixa um arquivo órfão.
    pub async fn save_profile_image(
        &self,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<String, AppError> {
        let extension = validate_image(content_type, bytes.len())?;

        let dir = self.upload_dir.join(PROFILE_IMAGE_DIR);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao criar diretório de uploads: {}", e))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension);
        let path = dir.join(&file_name);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| anyhow::anyhow!("Falha ao gravar imagem: {}", e))?;

        Ok(format!(
            "{}/{}/{}",
            PUBLIC_PREFIX, PROFILE_IMAGE_DIR, file_name
        ))
    }

    // Remoção best-effort: erro só vai para o log
    pub async fn delete_public_file(&self, public_path: &str) {
        let Some(relative) = public_path.strip_prefix(&format!("{}/", PUBLIC_PREFIX)) else {
            return;
        };

        let path = self.upload_dir.join(relative);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            tracing::warn!("Falha ao remover arquivo {:?}: {}", path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepted_mime_types() {
        assert_eq!(extension_for("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for("image/jpg"), Some("jpg"));
        assert_eq!(extension_for("image/png"), Some("png"));
        assert_eq!(extension_for("image/gif"), Some("gif"));
        assert_eq!(extension_for("application/pdf"), None);
        assert_eq!(extension_for("image/webp"), None);
    }

    #[test]
    fn oversized_image_is_rejected() {
        let err = validate_image("image/png", MAX_IMAGE_BYTES + 1).unwrap_err();
        assert!(matches!(err, AppError::UploadError(_)));
    }

    #[test]
    fn size_at_limit_is_accepted() {
        assert_eq!(validate_image("image/png", MAX_IMAGE_BYTES).unwrap(), "png");
    }

    #[tokio::test]
    async fn save_and_delete_roundtrip() {
        let dir = std::env::temp_dir().join(format!("uploads-{}", Uuid::new_v4()));
        let service = UploadService::new(dir.clone());

        let public = service
            .save_profile_image(b"fake-image-bytes", "image/png")
            .await
            .unwrap();
        assert!(public.starts_with("/uploads/profile-images/"));

        let on_disk = dir.join(public.strip_prefix("/uploads/").unwrap());
        assert!(on_disk.exists());

        service.delete_public_file(&public).await;
        assert!(!on_disk.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
