// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::domain::models::audit::{AuditRecord, NewAuditRecord};
use async_trait::async_trait;
use sea_orm::DbErr;
use thiserror::Error;

/// 仓库错误类型
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// 数据库错误
    #[error("Database error: {0}")]
    Database(#[from] DbErr),
    /// 记录未找到
    #[error("Record not found")]
    NotFound,
}

/// 审计历史仓库特质
///
/// 定义审计历史的数据访问接口。历史表只追加：
/// 没有更新、删除或过期操作。
#[async_trait]
pub trait AuditRepository: Send + Sync {
    /// 追加一条审计记录
    async fn insert(&self, record: NewAuditRecord) -> Result<AuditRecord, RepositoryError>;
    /// 按插入逆序列出全部记录
    async fn list_recent(&self) -> Result<Vec<AuditRecord>, RepositoryError>;
}
