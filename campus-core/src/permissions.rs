use async_trait::async_trait;
use uuid::Uuid;

/// Capabilities checked before tenant-scoped writes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Permission {
    CreateSubjects,
    CreatePrograms,
    CreateSchools,
}

/// Capability check seam. The real implementation lives with the identity
/// service; this layer only asks "may this caller write to this
/// organization" and propagates denials unchanged.
#[async_trait]
pub trait PermissionChecker: Send + Sync {
    async fn allowed(&self, organization_id: Uuid, permission: Permission) -> bool;
}

/// Grants everything. Default wiring for local development and tests.
pub struct AllowAll;

#[async_trait]
impl PermissionChecker for AllowAll {
    async fn allowed(&self, _organization_id: Uuid, _permission: Permission) -> bool {
        true
    }
}

/// Denies everything. Useful for exercising permission failure paths.
pub struct DenyAll;

#[async_trait]
impl PermissionChecker for DenyAll {
    async fn allowed(&self, _organization_id: Uuid, _permission: Permission) -> bool {
        false
    }
}
