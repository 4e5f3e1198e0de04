use crate::{
    context::UserOperationContext,
    error::MiddlewareError,
    middleware::UserOperationMiddleware,
};
use ethers::types::{spoof, Address, Bytes, U256};
use std::sync::Arc;
use userop_primitives::{
    constants::DEFAULT_USER_OPERATION, FieldError, IntoAddress, IntoBytes, IntoUint,
    UserOperation, UserOperationPartial,
};

/// Assembles user operations by running a middleware pipeline over a working record
///
/// The builder keeps two records: the working operation and a shadow of defaults. Defaults
/// seed the working record and are what it returns to after a successful build or an explicit
/// [reset_op](UserOperationBuilder::reset_op).
pub struct UserOperationBuilder {
    op: UserOperation,
    default_op: UserOperation,
    middlewares: Vec<Arc<dyn UserOperationMiddleware>>,
}

impl UserOperationBuilder {
    pub fn new() -> Self {
        let default_op = DEFAULT_USER_OPERATION.clone();
        Self { op: default_op.clone(), default_op, middlewares: vec![] }
    }

    /// The working operation in its current state
    pub fn op(&self) -> &UserOperation {
        &self.op
    }

    pub fn sender(&self) -> Address {
        self.op.sender
    }

    pub fn nonce(&self) -> U256 {
        self.op.nonce
    }

    pub fn init_code(&self) -> &Bytes {
        &self.op.init_code
    }

    pub fn call_data(&self) -> &Bytes {
        &self.op.call_data
    }

    pub fn call_gas_limit(&self) -> U256 {
        self.op.call_gas_limit
    }

    pub fn verification_gas_limit(&self) -> U256 {
        self.op.verification_gas_limit
    }

    pub fn pre_verification_gas(&self) -> U256 {
        self.op.pre_verification_gas
    }

    pub fn max_fee_per_gas(&self) -> U256 {
        self.op.max_fee_per_gas
    }

    pub fn max_priority_fee_per_gas(&self) -> U256 {
        self.op.max_priority_fee_per_gas
    }

    pub fn paymaster_and_data(&self) -> &Bytes {
        &self.op.paymaster_and_data
    }

    pub fn signature(&self) -> &Bytes {
        &self.op.signature
    }

    pub fn set_sender<V: IntoAddress>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.sender = value.into_address()?;
        Ok(self)
    }

    pub fn set_nonce<V: IntoUint>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.nonce = value.into_uint()?;
        Ok(self)
    }

    pub fn set_init_code<V: IntoBytes>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.init_code = value.into_bytes()?;
        Ok(self)
    }

    pub fn set_call_data<V: IntoBytes>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.call_data = value.into_bytes()?;
        Ok(self)
    }

    pub fn set_call_gas_limit<V: IntoUint>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.call_gas_limit = value.into_uint()?;
        Ok(self)
    }

    pub fn set_verification_gas_limit<V: IntoUint>(
        &mut self,
        value: V,
    ) -> Result<&mut Self, FieldError> {
        self.op.verification_gas_limit = value.into_uint()?;
        Ok(self)
    }

    pub fn set_pre_verification_gas<V: IntoUint>(
        &mut self,
        value: V,
    ) -> Result<&mut Self, FieldError> {
        self.op.pre_verification_gas = value.into_uint()?;
        Ok(self)
    }

    pub fn set_max_fee_per_gas<V: IntoUint>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.max_fee_per_gas = value.into_uint()?;
        Ok(self)
    }

    pub fn set_max_priority_fee_per_gas<V: IntoUint>(
        &mut self,
        value: V,
    ) -> Result<&mut Self, FieldError> {
        self.op.max_priority_fee_per_gas = value.into_uint()?;
        Ok(self)
    }

    pub fn set_paymaster_and_data<V: IntoBytes>(
        &mut self,
        value: V,
    ) -> Result<&mut Self, FieldError> {
        self.op.paymaster_and_data = value.into_bytes()?;
        Ok(self)
    }

    pub fn set_signature<V: IntoBytes>(&mut self, value: V) -> Result<&mut Self, FieldError> {
        self.op.signature = value.into_bytes()?;
        Ok(self)
    }

    /// Overlays the present fields of the partial onto the working operation
    pub fn set_partial(&mut self, partial: UserOperationPartial) -> &mut Self {
        partial.apply(&mut self.op);
        self
    }

    /// Overlays the present fields onto both the defaults and the working operation, so they
    /// survive resets
    pub fn use_defaults(&mut self, partial: UserOperationPartial) -> &mut Self {
        partial.apply(&mut self.default_op);
        partial.apply(&mut self.op);
        self
    }

    /// Returns the working operation to the current defaults
    pub fn reset_op(&mut self) -> &mut Self {
        self.op = self.default_op.clone();
        self
    }

    /// Drops accumulated defaults, returning to the stock gas table
    pub fn reset_defaults(&mut self) -> &mut Self {
        self.default_op = DEFAULT_USER_OPERATION.clone();
        self
    }

    /// Appends a middleware to the end of the pipeline
    pub fn use_middleware(&mut self, middleware: Arc<dyn UserOperationMiddleware>) -> &mut Self {
        self.middlewares.push(middleware);
        self
    }

    /// Removes every middleware from the pipeline
    pub fn reset_middleware(&mut self) -> &mut Self {
        self.middlewares.clear();
        self
    }

    /// Runs the pipeline over a copy of the working operation
    ///
    /// On success the finished operation is returned and the working record resets to the
    /// defaults, ready for the next build. On failure the working record is left as it was.
    pub async fn build_op(
        &mut self,
        entry_point: &Address,
        chain_id: u64,
        state_overrides: Option<spoof::State>,
    ) -> Result<UserOperation, MiddlewareError> {
        let mut ctx = UserOperationContext::new(self.op.clone(), *entry_point, chain_id)
            .with_state_overrides(state_overrides);
        for middleware in &self.middlewares {
            middleware.handle(&mut ctx).await?;
        }

        self.op = self.default_op.clone();
        Ok(ctx.op)
    }
}

impl Default for UserOperationBuilder {
    fn default() -> Self {
        Self::new()
    }
}
