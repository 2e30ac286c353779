// src/market/directory.rs
use chrono::Utc;

use crate::auth::password::{validate_new_password, PasswordHash};
use crate::auth::token::new_id;
use crate::domain::account::{buyer_score, Account, AccountStatus, NewUser, Role, SignupData};
use crate::errors::AccountError;
use crate::market::Market;
use crate::sync::CollectionUpdate;

impl Market {
    pub fn accounts(&self) -> &[Account] {
        &self.data().accounts
    }

    pub fn find_account(&self, id: &str) -> Option<&Account> {
        self.data().accounts.iter().find(|a| a.id == id)
    }

    /// Register a new account. Does not sign it in. Admins only exist as the
    /// configured built-in account.
    pub fn signup(&mut self, data: SignupData) -> Result<Account, AccountError> {
        if data.password.is_empty() {
            return Err(AccountError::InvalidPassword("password is required".into()));
        }

        let role = data.role.unwrap_or(Role::Buyer);
        if role == Role::Admin {
            return Err(AccountError::AdminSignupNotAllowed);
        }

        let accounts = &self.data().accounts;
        if accounts.iter().any(|u| u.email == data.email) {
            return Err(AccountError::DuplicateEmail);
        }
        if accounts.iter().any(|u| u.phone == data.phone) {
            return Err(AccountError::DuplicatePhone);
        }

        let score = if role == Role::Buyer {
            buyer_score(data.budget.as_deref(), data.preferred_location.as_deref())
        } else {
            0
        };

        let account = Account {
            id: new_id(),
            name: data.name,
            email: data.email,
            phone: data.phone,
            password: PasswordHash::new(&data.password),
            role,
            status: AccountStatus::Active,
            buyer_score: score,
            budget: data.budget,
            preferred_location: data.preferred_location,
            created_at: Utc::now(),
        };

        let mut updated = accounts.clone();
        updated.push(account.clone());
        self.store.commit(vec![CollectionUpdate::Accounts(updated)]);

        tracing::info!(account_id = %account.id, role = ?account.role, "account signed up");
        Ok(account)
    }

    /// Check credentials and start a session.
    pub fn login(&mut self, email: &str, password: &str) -> Result<Account, AccountError> {
        let found = if email == self.admin.email && self.admin.password.verify(password) {
            Some(self.admin.clone())
        } else {
            self.data()
                .accounts
                .iter()
                .find(|u| u.email == email && u.password.verify(password))
                .cloned()
        };

        let Some(account) = found else {
            tracing::debug!(email, "login rejected");
            return Err(AccountError::InvalidCredentials);
        };

        self.store.set_session(Some(account.clone()));
        tracing::info!(account_id = %account.id, "logged in");
        Ok(account)
    }

    pub fn logout(&mut self) {
        self.store.set_session(None);
    }

    /// Change the signed-in user's password.
    ///
    /// Admins are checked against the configured credential and nothing is
    /// saved: the built-in admin password cannot be changed at runtime.
    pub fn change_password(&mut self, current: &str, new: &str) -> Result<(), AccountError> {
        let Some(user) = self.current_user().cloned() else {
            return Err(AccountError::NotAuthenticated);
        };

        let current_ok = if user.role == Role::Admin {
            self.admin.password.verify(current)
        } else {
            self.data()
                .accounts
                .iter()
                .any(|u| u.id == user.id && u.password.verify(current))
        };
        if !current_ok {
            return Err(AccountError::IncorrectCurrentPassword);
        }

        validate_new_password(new)?;
        if new == current {
            return Err(AccountError::InvalidPassword(
                "new password must differ from the current one".into(),
            ));
        }

        if user.role == Role::Admin {
            tracing::warn!("admin password change accepted but not persisted");
            return Ok(());
        }

        let accounts = &self.data().accounts;

        let hash = PasswordHash::new(new);
        let updated: Vec<Account> = accounts
            .iter()
            .map(|u| {
                if u.id == user.id {
                    Account {
                        password: hash.clone(),
                        ..u.clone()
                    }
                } else {
                    u.clone()
                }
            })
            .collect();

        self.store.commit(vec![CollectionUpdate::Accounts(updated)]);
        self.store.set_session(Some(Account {
            password: hash,
            ..user
        }));
        Ok(())
    }

    /// Admin: add an account with the default password. Returns its id.
    pub fn add_user(&mut self, user: NewUser) -> Result<String, AccountError> {
        let accounts = &self.data().accounts;
        if accounts.iter().any(|u| u.email == user.email) {
            return Err(AccountError::DuplicateEmail);
        }

        let account = Account {
            id: new_id(),
            name: user.name,
            email: user.email,
            phone: user.phone,
            password: PasswordHash::new(&self.default_user_password),
            role: user.role,
            status: AccountStatus::Active,
            buyer_score: 0,
            budget: None,
            preferred_location: None,
            created_at: Utc::now(),
        };
        let id = account.id.clone();

        let mut updated = accounts.clone();
        updated.push(account);
        self.store.commit(vec![CollectionUpdate::Accounts(updated)]);

        tracing::info!(account_id = %id, "user added by admin");
        Ok(id)
    }

    /// Admin: flip active/inactive. Returns false for unknown ids.
    pub fn toggle_user_status(&mut self, id: &str) -> bool {
        let accounts = &self.data().accounts;
        if !accounts.iter().any(|u| u.id == id) {
            return false;
        }

        let updated: Vec<Account> = accounts
            .iter()
            .map(|u| {
                if u.id == id {
                    Account {
                        status: u.status.toggled(),
                        ..u.clone()
                    }
                } else {
                    u.clone()
                }
            })
            .collect();
        self.store.commit(vec![CollectionUpdate::Accounts(updated)]);
        true
    }

    /// Admin: hard-delete an account. Returns false for unknown ids.
    pub fn delete_user(&mut self, id: &str) -> bool {
        let accounts = &self.data().accounts;
        if !accounts.iter().any(|u| u.id == id) {
            return false;
        }

        let updated: Vec<Account> = accounts.iter().filter(|u| u.id != id).cloned().collect();
        self.store.commit(vec![CollectionUpdate::Accounts(updated)]);
        tracing::info!(account_id = %id, "user deleted");
        true
    }
}
