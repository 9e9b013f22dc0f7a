#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use terraform_provider_fakecloud::{FakecloudApi, FakecloudError, VirtualMachine};

/// In-memory stand-in for the fakecloud service.
#[derive(Default)]
pub struct MockCloud {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    vms: Vec<VirtualMachine>,
    next_id: i64,
    unavailable: bool,
}

impl MockCloud {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Seeds the service; listing returns VMs in exactly this order.
    pub fn with_vms(vms: Vec<VirtualMachine>) -> Arc<Self> {
        let next_id = vms.iter().map(|vm| vm.id).max().unwrap_or(0);
        Arc::new(Self {
            inner: Mutex::new(Inner {
                vms,
                next_id,
                unavailable: false,
            }),
        })
    }

    /// Every call fails with a 503 API error.
    pub fn unavailable() -> Arc<Self> {
        Arc::new(Self {
            inner: Mutex::new(Inner {
                unavailable: true,
                ..Default::default()
            }),
        })
    }

    pub fn vms(&self) -> Vec<VirtualMachine> {
        self.inner.lock().unwrap().vms.clone()
    }

    fn check(inner: &Inner) -> Result<(), FakecloudError> {
        if inner.unavailable {
            return Err(FakecloudError::Api {
                status: 503,
                message: "service unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl FakecloudApi for MockCloud {
    async fn create_vm(&self, vm: &VirtualMachine) -> Result<VirtualMachine, FakecloudError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner)?;
        inner.next_id += 1;
        let created = VirtualMachine {
            id: inner.next_id,
            name: vm.name.clone(),
            instance_type: vm.instance_type.clone(),
        };
        inner.vms.push(created.clone());
        Ok(created)
    }

    async fn get_vm(&self, id: i64) -> Result<VirtualMachine, FakecloudError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner)?;
        inner
            .vms
            .iter()
            .find(|vm| vm.id == id)
            .cloned()
            .ok_or(FakecloudError::NotFound { id })
    }

    async fn get_vms(&self) -> Result<Vec<VirtualMachine>, FakecloudError> {
        let inner = self.inner.lock().unwrap();
        Self::check(&inner)?;
        Ok(inner.vms.clone())
    }

    async fn update_vm(
        &self,
        id: i64,
        name: &str,
        instance_type: &str,
    ) -> Result<(), FakecloudError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner)?;
        let vm = inner
            .vms
            .iter_mut()
            .find(|vm| vm.id == id)
            .ok_or(FakecloudError::NotFound { id })?;
        vm.name = name.to_string();
        vm.instance_type = instance_type.to_string();
        Ok(())
    }

    async fn delete_vm(&self, id: i64) -> Result<(), FakecloudError> {
        let mut inner = self.inner.lock().unwrap();
        Self::check(&inner)?;
        let before = inner.vms.len();
        inner.vms.retain(|vm| vm.id != id);
        if inner.vms.len() == before {
            return Err(FakecloudError::NotFound { id });
        }
        Ok(())
    }
}

pub fn vm(id: i64, name: &str, instance_type: &str) -> VirtualMachine {
    VirtualMachine {
        id,
        name: name.to_string(),
        instance_type: instance_type.to_string(),
    }
}
