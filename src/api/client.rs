use super::operations::{
    ADD_PRODUCT, DELETE_PRODUCT, GET_PRODUCTS, GET_PRODUCT_BY_ID, SEND_OTP, UPDATE_PRODUCT,
    VERIFY_EMAIL, VERIFY_OTP,
};
use super::transport::{GraphQLTransport, TransportError};
use super::types::{
    AddProductData, AddProductInput, BidProduct, CatalogProduct, DeleteProductData, DeleteResult,
    EmailAvailability, ProductData, ProductInput, ProductsData, SendOtpData, SendOtpPayload,
    UpdateProductData, VerifyEmailData, VerifyOtpData, VerifyOtpInput, VerifyOtpPayload,
};
use async_trait::async_trait;
use serde_json::json;

/// The marketplace operations the client can perform.
///
/// Payload-returning calls yield `Ok(None)` when the server answered without
/// a payload for the operation; callers treat that as a business failure.
#[async_trait]
pub trait MarketplaceApi: Send + Sync {
    async fn send_otp(&self, phone_number: &str) -> Result<Option<SendOtpPayload>, TransportError>;

    async fn verify_otp(
        &self,
        input: &VerifyOtpInput,
    ) -> Result<Option<VerifyOtpPayload>, TransportError>;

    async fn verify_email(&self, email: &str)
        -> Result<Option<EmailAvailability>, TransportError>;

    async fn add_product(&self, input: &AddProductInput)
        -> Result<Option<BidProduct>, TransportError>;

    async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Option<CatalogProduct>, TransportError>;

    async fn delete_product(&self, id: &str) -> Result<Option<DeleteResult>, TransportError>;

    async fn products(&self) -> Result<Vec<CatalogProduct>, TransportError>;

    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, TransportError>;
}

/// [`MarketplaceApi`] backed by the GraphQL transport
#[derive(Clone)]
pub struct GraphQLMarketplace {
    transport: GraphQLTransport,
}

impl GraphQLMarketplace {
    pub fn new(transport: GraphQLTransport) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &GraphQLTransport {
        &self.transport
    }
}

#[async_trait]
impl MarketplaceApi for GraphQLMarketplace {
    async fn send_otp(&self, phone_number: &str) -> Result<Option<SendOtpPayload>, TransportError> {
        let data: SendOtpData = self
            .transport
            .execute(&SEND_OTP, json!({ "phoneNumber": phone_number }))
            .await?;
        Ok(data.send_otp)
    }

    async fn verify_otp(
        &self,
        input: &VerifyOtpInput,
    ) -> Result<Option<VerifyOtpPayload>, TransportError> {
        let data: VerifyOtpData = self
            .transport
            .execute(&VERIFY_OTP, json!({ "input": input }))
            .await?;
        Ok(data.verify_otp)
    }

    async fn verify_email(
        &self,
        email: &str,
    ) -> Result<Option<EmailAvailability>, TransportError> {
        let data: VerifyEmailData = self
            .transport
            .execute(&VERIFY_EMAIL, json!({ "email": email }))
            .await?;
        Ok(data.verify_email_id)
    }

    async fn add_product(
        &self,
        input: &AddProductInput,
    ) -> Result<Option<BidProduct>, TransportError> {
        let data: AddProductData = self
            .transport
            .execute(&ADD_PRODUCT, json!({ "input": input }))
            .await?;
        Ok(data.add_product)
    }

    async fn update_product(
        &self,
        id: &str,
        input: &ProductInput,
    ) -> Result<Option<CatalogProduct>, TransportError> {
        let data: UpdateProductData = self
            .transport
            .execute(&UPDATE_PRODUCT, json!({ "id": id, "input": input }))
            .await?;
        Ok(data.update_product)
    }

    async fn delete_product(&self, id: &str) -> Result<Option<DeleteResult>, TransportError> {
        let data: DeleteProductData = self
            .transport
            .execute(&DELETE_PRODUCT, json!({ "id": id }))
            .await?;
        Ok(data.delete_product)
    }

    async fn products(&self) -> Result<Vec<CatalogProduct>, TransportError> {
        let data: ProductsData = self.transport.execute(&GET_PRODUCTS, json!({})).await?;
        Ok(data.products.unwrap_or_default())
    }

    async fn product(&self, id: &str) -> Result<Option<CatalogProduct>, TransportError> {
        let data: ProductData = self
            .transport
            .execute(&GET_PRODUCT_BY_ID, json!({ "id": id }))
            .await?;
        Ok(data.product)
    }
}
