use crate::{error, jwt::Claims};
use axum::{
    http::Request,
    response::{IntoResponse, Response},
};
use futures::future::{BoxFuture, FutureExt};
use std::{
    convert::Infallible,
    future::Future,
    task::{Context, Poll},
};
use tower::{Layer, Service};

pub const ADMIN: &str = "practice.admin";

type PermissionList = &'static [&'static str];

/// Rejects requests whose claims lack any of the listed permissions.
#[derive(Debug, Clone)]
pub struct PermissionsLayer {
    permissions: PermissionList,
}

impl PermissionsLayer {
    pub fn new(permissions: PermissionList) -> Self {
        Self { permissions }
    }
}

impl<S> Layer<S> for PermissionsLayer {
    type Service = Permissions<S>;

    fn layer(&self, inner: S) -> Self::Service {
        Permissions::new(inner, self.permissions)
    }
}

#[derive(Debug, Clone)]
pub struct Permissions<S> {
    inner: S,
    permissions: PermissionList,
}

impl<S> Permissions<S> {
    fn new(inner: S, permissions: PermissionList) -> Self {
        Permissions { inner, permissions }
    }
}

impl<S, B> Service<Request<B>> for Permissions<S>
where
    S: Service<Request<B>, Error = Infallible, Response = Response> + Send,
    S::Future: Future + Send + 'static,
    B: Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<B>) -> Self::Future {
        let Some(claims) = req.extensions().get::<Claims>() else {
            return async { Ok(error::COULD_NOT_GET_CLAIMS.into_response()) }.boxed();
        };

        if let Some(missing) = self
            .permissions
            .iter()
            .find(|permission| !claims.has_permission(permission))
        {
            warn!(
                user_id = claims.sub.as_str(),
                permission = *missing,
                "missing permission"
            );
            return async { Ok(error::NOT_ENOUGH_PERMISSIONS.into_response()) }.boxed();
        }

        self.inner.call(req).boxed()
    }
}
