/// HTTP middleware
///
/// Basic Authentication for the admin subtree. Credentials are injected
/// from the loaded configuration when the middleware is constructed, so
/// there is no hidden global state and no environment access per request.
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::Error;
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use crate::error::AppError;

/// Actix middleware that requires HTTP Basic Authentication
pub struct BasicAuth {
    username: Rc<String>,
    password: Rc<String>,
}

impl BasicAuth {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: Rc::new(username.to_string()),
            password: Rc::new(password.to_string()),
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for BasicAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = BasicAuthService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(BasicAuthService {
            service: Rc::new(service),
            username: self.username.clone(),
            password: self.password.clone(),
        }))
    }
}

pub struct BasicAuthService<S> {
    service: Rc<S>,
    username: Rc<String>,
    password: Rc<String>,
}

impl<S, B> Service<ServiceRequest> for BasicAuthService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();
        let username = self.username.clone();
        let password = self.password.clone();

        Box::pin(async move {
            let header = req
                .headers()
                .get("Authorization")
                .and_then(|h| h.to_str().ok())
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

            let encoded = header
                .strip_prefix("Basic ")
                .ok_or_else(|| AppError::Unauthorized("Unauthorized".to_string()))?;

            let decoded = BASE64
                .decode(encoded)
                .ok()
                .and_then(|bytes| String::from_utf8(bytes).ok())
                .ok_or_else(|| AppError::BadRequest("Invalid authorization header".to_string()))?;

            let (user, pass) = decoded
                .split_once(':')
                .ok_or_else(|| AppError::BadRequest("Invalid credentials format".to_string()))?;

            if user != username.as_str() || pass != password.as_str() {
                return Err(AppError::Unauthorized("Invalid credentials".to_string()).into());
            }

            service.call(req).await
        })
    }
}
