// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Named native operations callable from the embedded web content.
//
// The web content sees a single global object (`window.AndroidNative`) whose
// methods take one integer and return nothing. Handlers run synchronously on
// whichever thread the webview delivers the call on.

use std::collections::HashMap;

use bloxplode_core::error::{BloxError, Result};

/// A registered operation.
pub type Handler = Box<dyn Fn(i64) + Send + Sync>;

/// Operations exposed under one namespace.
pub struct BridgeRegistry {
    namespace: String,
    handlers: HashMap<String, Handler>,
}

impl BridgeRegistry {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            handlers: HashMap::new(),
        }
    }

    /// Global name the operations appear under in the web content.
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Register `handler` under `method`, replacing any previous one.
    pub fn register<F>(&mut self, method: impl Into<String>, handler: F)
    where
        F: Fn(i64) + Send + Sync + 'static,
    {
        let method = method.into();
        tracing::debug!(namespace = %self.namespace, %method, "registering bridge method");
        self.handlers.insert(method, Box::new(handler));
    }

    pub fn invoke(&self, method: &str, arg: i64) -> Result<()> {
        let handler = self
            .handlers
            .get(method)
            .ok_or_else(|| BloxError::UnknownCommand(format!("{}.{method}", self.namespace)))?;
        handler(arg);
        Ok(())
    }

    /// Registered method names, sorted.
    pub fn methods(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.handlers.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}
