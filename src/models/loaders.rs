use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::{AppError, AppResult, FileError};
use crate::models::job::{GradingJob, Submission};

/// 从 TOML 文件加载评分任务并校验
pub async fn load_grading_job(toml_file_path: &Path) -> AppResult<GradingJob> {
    let path_str = toml_file_path.display().to_string();

    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&path_str, e))?;

    let job: GradingJob =
        toml::from_str(&content).map_err(|e| AppError::toml_parse_failed(&path_str, e))?;

    job.validate()?;

    tracing::info!(
        "成功加载评分任务: 总分 {}, {} 条评分标准",
        job.total_marks,
        job.criteria.len()
    );

    Ok(job)
}

/// 从文件夹加载所有 `.txt` 提交（文本已由外部提取），按文件名排序
pub async fn load_submissions(folder_path: &str) -> AppResult<Vec<Submission>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }));
    }

    let mut paths = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("txt") {
            paths.push(path);
        }
    }
    paths.sort();

    let mut submissions = Vec::with_capacity(paths.len());
    for path in paths {
        let filename = path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();

        match fs::read_to_string(&path).await {
            Ok(text) => {
                tracing::info!("正在加载: {} ({} 字符)", filename, text.chars().count());
                submissions.push(Submission::new(filename, text));
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(submissions)
}
