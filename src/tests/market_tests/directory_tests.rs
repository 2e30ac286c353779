use crate::domain::account::{AccountStatus, NewUser, Role, SignupData};
use crate::errors::AccountError;
use crate::market::ADMIN_ID;
use crate::tests::utils::{init_test_market, login, signup_as, ADMIN_EMAIL, ADMIN_PASSWORD, PASSWORD};

fn signup_data(email: &str, phone: &str) -> SignupData {
    SignupData {
        name: "Sara".into(),
        email: email.into(),
        phone: phone.into(),
        password: PASSWORD.into(),
        ..Default::default()
    }
}

#[test]
fn emails_and_phones_are_unique() {
    let mut market = init_test_market();
    market.signup(signup_data("sara@example.com", "0100")).unwrap();

    let err = market.signup(signup_data("sara@example.com", "0199")).unwrap_err();
    assert_eq!(err, AccountError::DuplicateEmail);

    let err = market.signup(signup_data("other@example.com", "0100")).unwrap_err();
    assert_eq!(err, AccountError::DuplicatePhone);

    // Email is checked first when both clash
    let err = market.signup(signup_data("sara@example.com", "0100")).unwrap_err();
    assert_eq!(err, AccountError::DuplicateEmail);

    assert_eq!(market.accounts().len(), 1);
}

#[test]
fn signup_defaults_to_buyer_and_scores_profile() {
    let mut market = init_test_market();
    let account = market
        .signup(SignupData {
            budget: Some("500k-1m".into()),
            preferred_location: Some("Maadi".into()),
            ..signup_data("b@example.com", "0101")
        })
        .unwrap();

    assert_eq!(account.role, Role::Buyer);
    assert_eq!(account.status, AccountStatus::Active);
    assert_eq!(account.buyer_score, 80);
    assert!(market.current_user().is_none(), "signup does not sign in");
}

#[test]
fn agents_get_no_buyer_score() {
    let mut market = init_test_market();
    let agent = signup_as(&mut market, "Dev One", Role::Developer);
    assert_eq!(agent.buyer_score, 0);
}

#[test]
fn passwords_are_never_stored_in_plain_text() {
    let mut market = init_test_market();
    let account = market.signup(signup_data("c@example.com", "0102")).unwrap();
    assert_ne!(account.password.digest, PASSWORD);
    assert!(account.password.verify(PASSWORD));
}

#[test]
fn empty_password_is_refused() {
    let mut market = init_test_market();
    let err = market
        .signup(SignupData {
            password: String::new(),
            ..signup_data("d@example.com", "0103")
        })
        .unwrap_err();
    assert!(matches!(err, AccountError::InvalidPassword(_)));
}

#[test]
fn login_starts_a_session_and_logout_ends_it() {
    let mut market = init_test_market();
    let account = market.signup(signup_data("e@example.com", "0104")).unwrap();

    assert_eq!(
        market.login("e@example.com", "wrong").unwrap_err(),
        AccountError::InvalidCredentials
    );
    assert_eq!(
        market.login("nobody@example.com", PASSWORD).unwrap_err(),
        AccountError::InvalidCredentials
    );

    let logged_in = market.login("e@example.com", PASSWORD).unwrap();
    assert_eq!(logged_in.id, account.id);
    assert_eq!(market.current_user().map(|u| u.id.as_str()), Some(account.id.as_str()));

    market.logout();
    assert!(market.current_user().is_none());
}

#[test]
fn builtin_admin_can_log_in() {
    let mut market = init_test_market();
    let admin = market.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    assert_eq!(admin.id, ADMIN_ID);
    assert!(admin.is_admin());
    assert!(market.accounts().is_empty(), "admin is not a directory entry");
}

#[test]
fn change_password_requires_a_session() {
    let mut market = init_test_market();
    assert_eq!(
        market.change_password(PASSWORD, "Better#456").unwrap_err(),
        AccountError::NotAuthenticated
    );
}

#[test]
fn change_password_checks_current_and_policy() {
    let mut market = init_test_market();
    let account = signup_as(&mut market, "Pat Buyer", Role::Buyer);
    login(&mut market, &account);

    assert_eq!(
        market.change_password("nope", "Better#456").unwrap_err(),
        AccountError::IncorrectCurrentPassword
    );
    // The current password is checked before the new one
    assert_eq!(
        market.change_password("nope", "weak").unwrap_err(),
        AccountError::IncorrectCurrentPassword
    );
    assert!(matches!(
        market.change_password(PASSWORD, "weakpass").unwrap_err(),
        AccountError::InvalidPassword(_)
    ));
    assert!(matches!(
        market.change_password(PASSWORD, PASSWORD).unwrap_err(),
        AccountError::InvalidPassword(_)
    ));

    market.change_password(PASSWORD, "Better#456").unwrap();
    market.logout();

    assert_eq!(
        market.login(&account.email, PASSWORD).unwrap_err(),
        AccountError::InvalidCredentials
    );
    market.login(&account.email, "Better#456").unwrap();
}

#[test]
fn admin_password_change_is_not_persisted() {
    let mut market = init_test_market();
    market.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();

    // The configured admin password does not meet the policy, so only the
    // new one is checked against it.
    market.change_password(ADMIN_PASSWORD, "Better#456").unwrap();
    market.logout();

    market.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
}

#[test]
fn admin_added_users_get_the_default_password() {
    let mut market = init_test_market();
    let id = market
        .add_user(NewUser {
            name: "New Marketer".into(),
            email: "nm@example.com".into(),
            phone: "0105".into(),
            role: Role::Marketer,
        })
        .unwrap();

    let added = market.find_account(&id).unwrap();
    assert_eq!(added.status, AccountStatus::Active);
    market.login("nm@example.com", "password123").unwrap();

    let err = market
        .add_user(NewUser {
            name: "Dup".into(),
            email: "nm@example.com".into(),
            phone: "0106".into(),
            role: Role::Buyer,
        })
        .unwrap_err();
    assert_eq!(err, AccountError::DuplicateEmail);
}

#[test]
fn toggle_and_delete_users() {
    let mut market = init_test_market();
    let account = signup_as(&mut market, "Lee Buyer", Role::Buyer);

    assert!(market.toggle_user_status(&account.id));
    assert_eq!(market.find_account(&account.id).unwrap().status, AccountStatus::Inactive);
    assert!(market.toggle_user_status(&account.id));
    assert_eq!(market.find_account(&account.id).unwrap().status, AccountStatus::Active);

    assert!(!market.toggle_user_status("missing"));
    assert!(!market.delete_user("missing"));

    assert!(market.delete_user(&account.id));
    assert!(market.find_account(&account.id).is_none());
}

#[test]
fn admins_cannot_sign_up() {
    let mut market = init_test_market();
    let err = market
        .signup(SignupData {
            role: Some(Role::Admin),
            ..signup_data("root@example.com", "0107")
        })
        .unwrap_err();
    assert_eq!(err, AccountError::AdminSignupNotAllowed);
    assert!(market.accounts().is_empty());
}

#[test]
fn admin_current_password_is_checked_first() {
    let mut market = init_test_market();
    market.login(ADMIN_EMAIL, ADMIN_PASSWORD).unwrap();
    assert_eq!(
        market.change_password("not-the-admin-password", "weak").unwrap_err(),
        AccountError::IncorrectCurrentPassword
    );
}
