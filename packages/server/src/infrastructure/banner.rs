//! Welcome banner asset.

use std::path::Path;

/// Read the banner file. Called on every negotiation so edits apply without a restart.
///
/// A missing or unreadable file yields an empty banner.
pub async fn load_banner(path: &Path) -> Vec<u8> {
    match tokio::fs::read(path).await {
        Ok(content) => content,
        Err(e) => {
            tracing::warn!("Error while getting a logo from {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_banner_reads_file() {
        // テスト項目: バナーファイルの内容がそのまま返される
        // given (前提条件):
        let path = std::env::temp_dir().join(format!("linechat-banner-{}", uuid::Uuid::new_v4()));
        tokio::fs::write(&path, "  _\n (o>\n").await.unwrap();

        // when (操作):
        let banner = load_banner(&path).await;

        // then (期待する結果):
        assert_eq!(banner, b"  _\n (o>\n");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_load_banner_missing_file_is_empty() {
        // テスト項目: ファイルが存在しない場合は空のバナーになる
        // given (前提条件):
        let path = std::env::temp_dir().join(format!("linechat-missing-{}", uuid::Uuid::new_v4()));

        // when (操作):
        let banner = load_banner(&path).await;

        // then (期待する結果):
        assert!(banner.is_empty());
    }
}
