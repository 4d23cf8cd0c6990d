use chrono::Utc;

use crate::actor_framework::Entity;
use crate::domain::{Profile, User, UserCreate, UserPatch};

impl User {
    fn check_coordinates(&self) -> Result<(), String> {
        let farm = match &self.profile {
            Profile::Farmer(farmer) => farmer.farm_location,
            Profile::Vendor(vendor) => vendor.business_address.coordinates,
        };
        let home = self.address.as_ref().and_then(|a| a.coordinates);
        match [farm, home].into_iter().flatten().find(|c| !c.is_valid()) {
            Some(bad) => Err(format!("Invalid coordinates: {}, {}", bad.latitude, bad.longitude)),
            None => Ok(()),
        }
    }
}

impl Entity for User {
    type Id = String;
    type CreateParams = UserCreate;
    type Patch = UserPatch;
    type Action = ();
    type ActionResult = ();

    fn id(&self) -> &String {
        &self.id
    }

    fn unique_key(&self) -> Option<&str> {
        Some(&self.email)
    }

    /// Creates a new User from sign-up parameters.
    ///
    /// The email must look like one and the role must match the profile kind.
    fn from_create_params(id: String, params: UserCreate) -> Result<Self, String> {
        if !params.email.contains('@') {
            return Err(format!("Invalid email: {}", params.email));
        }
        if params.profile.role() != params.role {
            return Err(format!(
                "Profile kind {} does not match role {}",
                params.profile.role(),
                params.role
            ));
        }
        let user = Self {
            id,
            email: params.email,
            role: params.role,
            name: params.name,
            phone: params.phone,
            address: params.address,
            profile: params.profile,
            created_at: Utc::now(),
        };
        user.check_coordinates()?;
        Ok(user)
    }

    /// Updates profile fields.
    ///
    /// A replacement profile must keep the account's role.
    fn on_update(&mut self, patch: UserPatch) -> Result<(), String> {
        if let Some(profile) = patch.profile {
            if profile.role() != self.role {
                return Err(format!("Cannot switch a {} account to a {} profile", self.role, profile.role()));
            }
            self.profile = profile;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(address) = patch.address {
            self.address = Some(address);
        }
        self.check_coordinates()
    }

    fn handle_action(&mut self, _action: ()) -> Result<(), String> {
        Ok(())
    }
}
