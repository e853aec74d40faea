use thiserror::Error;
use uuid::Uuid;

/// Errors raised when a context lacks the scope an operation requires.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SecurityError {
    #[error("security context has no tenant scope")]
    MissingTenant,
    #[error("security context has no subject")]
    MissingSubject,
}

/// `SecurityContext` carries the tenant and acting subject of a request.
///
/// A nil UUID means "not set": the anonymous context has neither a tenant
/// nor a subject and is rejected by every tenant-scoped operation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SecurityContext {
    tenant_id: Uuid,
    subject_id: Uuid,
    subject_type: Option<String>,
}

impl SecurityContext {
    /// Create a new `SecurityContext` builder
    #[must_use]
    pub fn builder() -> SecurityContextBuilder {
        SecurityContextBuilder::default()
    }

    /// Create an anonymous `SecurityContext` with no tenant or subject
    #[must_use]
    pub fn anonymous() -> Self {
        SecurityContextBuilder::default().build()
    }

    #[must_use]
    pub fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    /// Subject (user, service, or system) acting in this context.
    #[must_use]
    pub fn subject_id(&self) -> Uuid {
        self.subject_id
    }

    #[must_use]
    pub fn subject_type(&self) -> Option<&str> {
        self.subject_type.as_deref()
    }

    /// Returns the tenant id, or an error for contexts without tenant scope.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::MissingTenant`] when the tenant id is nil.
    pub fn require_tenant(&self) -> Result<Uuid, SecurityError> {
        if self.tenant_id.is_nil() {
            return Err(SecurityError::MissingTenant);
        }
        Ok(self.tenant_id)
    }

    /// Returns the subject id, or an error for contexts without a subject.
    ///
    /// # Errors
    ///
    /// Returns [`SecurityError::MissingSubject`] when the subject id is nil.
    pub fn require_subject(&self) -> Result<Uuid, SecurityError> {
        if self.subject_id.is_nil() {
            return Err(SecurityError::MissingSubject);
        }
        Ok(self.subject_id)
    }
}

#[derive(Default)]
pub struct SecurityContextBuilder {
    tenant_id: Option<Uuid>,
    subject_id: Option<Uuid>,
    subject_type: Option<String>,
}

impl SecurityContextBuilder {
    #[must_use]
    pub fn tenant_id(mut self, tenant_id: Uuid) -> Self {
        self.tenant_id = Some(tenant_id);
        self
    }

    #[must_use]
    pub fn subject_id(mut self, subject_id: Uuid) -> Self {
        self.subject_id = Some(subject_id);
        self
    }

    #[must_use]
    pub fn subject_type(mut self, subject_type: &str) -> Self {
        self.subject_type = Some(subject_type.to_owned());
        self
    }

    #[must_use]
    pub fn build(self) -> SecurityContext {
        SecurityContext {
            tenant_id: self.tenant_id.unwrap_or_default(),
            subject_id: self.subject_id.unwrap_or_default(),
            subject_type: self.subject_type,
        }
    }
}
