//! Shared route fixtures for integration tests.
//!
//! The mailbox table in three variants: fully resolved, partially asynchronous
//! (the same routes behind deferred fields) and one whose settings page fails to load.

#![allow(dead_code)]

use route_sync::{Component, Deferred, RouteError, RouteNode, RouteResult};

/// Deferred value that settles on a later poll.
pub fn async_getter<T>(value: T) -> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    Deferred::new(move || async move {
        tokio::task::yield_now().await;
        Ok(value)
    })
}

/// Deferred value that fails on a later poll.
pub fn failing_getter<T>(message: &'static str) -> Deferred<T>
where
    T: Clone + Send + Sync + 'static,
{
    Deferred::new(move || async move {
        tokio::task::yield_now().await;
        RouteResult::<T>::Err(RouteError::producer(message))
    })
}

fn messages_redirect() -> RouteNode {
    RouteNode::redirect("messages/:id", "/messages/:id")
}

pub fn routes_plain() -> Vec<RouteNode> {
    vec![RouteNode::at("/")
        .with_component("App")
        .with_index_route(RouteNode::new().with_component("Dashboard"))
        .with_child(RouteNode::at("about").with_component("About"))
        .with_child(
            RouteNode::at("inbox")
                .with_component("Inbox")
                .with_index_route(RouteNode::new().with_component("Messages"))
                .with_child(RouteNode::at("settings").with_component("Settings"))
                .with_child(messages_redirect()),
        )
        .with_child(
            RouteNode::new()
                .with_component("Inbox")
                .with_child(RouteNode::at("messages/:id").with_component("Message")),
        )]
}

fn partial_async(settings: Deferred<Component>) -> RouteNode {
    RouteNode::at("/")
        .with_deferred_component(async_getter(Component::from("App")))
        .with_index_route(RouteNode::new().with_component("Dashboard"))
        .with_deferred_children(async_getter(vec![
            RouteNode::at("about").with_component("About"),
            RouteNode::at("inbox")
                .with_deferred_component(async_getter(Component::from("Inbox")))
                .with_deferred_index_route(async_getter(
                    RouteNode::new().with_deferred_component(async_getter(Component::from("Messages"))),
                ))
                .with_child(RouteNode::at("settings").with_deferred_component(settings))
                .with_child(messages_redirect()),
            RouteNode::new()
                .with_component("Inbox")
                .with_deferred_children(async_getter(vec![RouteNode::at("messages/:id")
                    .with_deferred_component(async_getter(Component::from("Message")))])),
        ]))
}

pub fn routes_partial_async() -> RouteNode {
    partial_async(async_getter(Component::from("Settings")))
}

pub fn routes_failing() -> RouteNode {
    partial_async(failing_getter("settings bundle unavailable"))
}

pub fn full_paths(routes: &[route_sync::FlatRoute]) -> Vec<&str> {
    routes.iter().map(|route| route.full_path.as_str()).collect()
}

pub fn parent_components(route: &route_sync::FlatRoute) -> Vec<&str> {
    route
        .parents
        .iter()
        .filter_map(|parent| parent.component())
        .map(Component::name)
        .collect()
}
