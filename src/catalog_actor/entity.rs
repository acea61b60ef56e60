use std::convert::Infallible;

use crate::actor_framework::{Entity, Retain};
use crate::domain::{MenuItem, Restaurant};
use crate::storage::RecordKey;

// Reference data only enters storage through seeding. Create and patch
// payloads are uninhabited, so those requests cannot even be built.

impl Entity for Restaurant {
    type Id = String;
    type CreateParams = Infallible;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = ();

    const RECORD: RecordKey = RecordKey::Restaurants;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(_id: String, params: Infallible) -> Result<Self, String> {
        match params {}
    }

    fn on_update(&mut self, patch: Infallible) -> Result<Retain, String> {
        match patch {}
    }

    fn on_delete(&self) -> Result<(), String> {
        Err(format!("Restaurant {} is reference data", self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}

impl Entity for MenuItem {
    type Id = String;
    type CreateParams = Infallible;
    type Patch = Infallible;
    type Action = ();
    type ActionResult = ();

    const RECORD: RecordKey = RecordKey::MenuItems;

    fn id(&self) -> &String {
        &self.id
    }

    fn from_create_params(_id: String, params: Infallible) -> Result<Self, String> {
        match params {}
    }

    fn on_update(&mut self, patch: Infallible) -> Result<Retain, String> {
        match patch {}
    }

    fn on_delete(&self) -> Result<(), String> {
        Err(format!("Menu item {} is reference data", self.id))
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
