use std::{fmt::Display, path::Path, str::FromStr};

use crate::{error::AppError, models::IMAGE_URL_PREFIX};

/// File extensions treated as images
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Image folders are split by gender
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }
}

impl Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            _ => Err(AppError::InvalidInput("Invalid gender".to_string())),
        }
    }
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|e| ext.eq_ignore_ascii_case(e)))
        .unwrap_or(false)
}

/// Lists the public URLs of the images in `<images_dir>/<gender>`, sorted by name
///
/// Best effort: an unreadable directory or entry is logged and skipped.
pub async fn list_images(images_dir: &Path, gender: Gender) -> Vec<String> {
    let dir = images_dir.join(gender.as_str());

    let mut entries = match tokio::fs::read_dir(&dir).await {
        Ok(entries) => entries,
        Err(e) => {
            tracing::warn!(dir = %dir.display(), error = %e, "Cannot read image directory");
            return Vec::new();
        }
    };

    let mut names = Vec::new();
    loop {
        match entries.next_entry().await {
            Ok(Some(entry)) => {
                let path = entry.path();
                let is_file = entry.file_type().await.map(|t| t.is_file()).unwrap_or(false);
                if !is_file || !is_image_file(&path) {
                    continue;
                }
                if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                    names.push(name.to_string());
                }
            }
            Ok(None) => break,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Error reading image directory entry");
                break;
            }
        }
    }

    names.sort();
    tracing::debug!(gender = %gender, count = names.len(), "Listed images");

    names
        .into_iter()
        .map(|name| format!("{}/{}/{}", IMAGE_URL_PREFIX, gender, name))
        .collect()
}
