//! GraphQL operation catalogue.
//!
//! Every operation the client can issue is declared here exactly once.
//! Screens and services refer to these constants; none of them carry their
//! own documents. Each document requests the union of the fields any caller
//! reads, and callers pick what they need from the typed payloads in
//! [`super::types`].

use indoc::indoc;

/// A named GraphQL operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation name, used for logging
    pub name: &'static str,
    /// The GraphQL document
    pub document: &'static str,
}

// ============================================================================
// AUTHENTICATION
// ============================================================================

pub const SEND_OTP: Operation = Operation {
    name: "SendOTP",
    document: indoc! {r#"
  mutation SendOTP($phoneNumber: String!) {
    sendOTP(phoneNumber: $phoneNumber) {
      success
      message
      isNewUser
      expiresIn
      otp
    }
  }
"#},
};

pub const VERIFY_OTP: Operation = Operation {
    name: "VerifyOTP",
    document: indoc! {r#"
  mutation VerifyOTP($input: VerifyOTPInput!) {
    verifyOTP(input: $input) {
      success
      message
      accessToken
      idToken
      refreshToken
      isNewUser
    }
  }
"#},
};

pub const VERIFY_EMAIL: Operation = Operation {
    name: "VerifyEmailId",
    document: indoc! {r#"
  mutation VerifyEmailId($email: String!) {
    verifyEmailId(email: $email) {
      available
      message
    }
  }
"#},
};

// ============================================================================
// LISTINGS
// ============================================================================

pub const ADD_PRODUCT: Operation = Operation {
    name: "AddProduct",
    document: indoc! {r#"
  mutation AddProduct($input: AddBidProductInput!) {
    addProduct(input: $input) {
      productId
      name
      expectedPrice
      bidStartDate
      bidEndDate
      imageUrls
      descriptionText
      userId
      location {
        lat
        lng
      }
      locationName
    }
  }
"#},
};

pub const UPDATE_PRODUCT: Operation = Operation {
    name: "UpdateProduct",
    document: indoc! {r#"
  mutation UpdateProduct($id: ID!, $input: ProductInput!) {
    updateProduct(id: $id, input: $input) {
      id
      name
      price
      description
      category
      updatedAt
    }
  }
"#},
};

pub const DELETE_PRODUCT: Operation = Operation {
    name: "DeleteProduct",
    document: indoc! {r#"
  mutation DeleteProduct($id: ID!) {
    deleteProduct(id: $id) {
      success
      message
    }
  }
"#},
};

pub const GET_PRODUCTS: Operation = Operation {
    name: "GetProducts",
    document: indoc! {r#"
  query GetProducts {
    products {
      id
      name
      price
      description
      category
      createdAt
    }
  }
"#},
};

pub const GET_PRODUCT_BY_ID: Operation = Operation {
    name: "GetProductById",
    document: indoc! {r#"
  query GetProductById($id: ID!) {
    product(id: $id) {
      id
      name
      price
      description
      category
      createdAt
    }
  }
"#},
};
