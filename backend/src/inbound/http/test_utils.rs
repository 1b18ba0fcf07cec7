//! Test helpers for inbound HTTP components.

use std::sync::Arc;

use crate::domain::ports::{
    MockBlogsCommand, MockBlogsQuery, MockLoginService, MockTokenAuthenticator,
    MockUserRegistration, MockUsersQuery,
};
use crate::domain::{Error, User, UserId, Username};
use crate::inbound::http::state::HttpState;

/// Token accepted by [`StateBuilder::accepting_token_for`].
pub const VALID_TOKEN: &str = "valid-token";

/// Build a user with a random id and no blogs.
pub fn user_named(username: &str) -> User {
    User::new(
        UserId::random(),
        Username::new(username).expect("valid username"),
        None,
        Vec::new(),
    )
}

/// Assemble [`HttpState`] from mocks. Ports left unconfigured panic if a
/// handler calls them.
#[derive(Default)]
pub struct StateBuilder {
    blogs: MockBlogsCommand,
    blogs_query: MockBlogsQuery,
    registration: MockUserRegistration,
    users: MockUsersQuery,
    login: MockLoginService,
    authenticator: MockTokenAuthenticator,
}

impl StateBuilder {
    pub fn blogs(mut self, configure: impl FnOnce(&mut MockBlogsCommand)) -> Self {
        configure(&mut self.blogs);
        self
    }

    pub fn blogs_query(mut self, configure: impl FnOnce(&mut MockBlogsQuery)) -> Self {
        configure(&mut self.blogs_query);
        self
    }

    pub fn registration(mut self, configure: impl FnOnce(&mut MockUserRegistration)) -> Self {
        configure(&mut self.registration);
        self
    }

    pub fn users(mut self, configure: impl FnOnce(&mut MockUsersQuery)) -> Self {
        configure(&mut self.users);
        self
    }

    pub fn login(mut self, configure: impl FnOnce(&mut MockLoginService)) -> Self {
        configure(&mut self.login);
        self
    }

    /// Resolve tokens with `resolve`.
    pub fn authenticator<F>(mut self, resolve: F) -> Self
    where
        F: Fn(&str) -> Result<User, Error> + Send + 'static,
    {
        self.authenticator
            .expect_authenticate()
            .returning(move |token| resolve(token));
        self
    }

    /// Accept [`VALID_TOKEN`] as `user` and reject anything else.
    pub fn accepting_token_for(self, user: User) -> Self {
        self.authenticator(move |token| {
            if token == VALID_TOKEN {
                Ok(user.clone())
            } else {
                Err(Error::unauthorized("token missing or invalid"))
            }
        })
    }

    pub fn build(self) -> HttpState {
        HttpState {
            blogs: Arc::new(self.blogs),
            blogs_query: Arc::new(self.blogs_query),
            registration: Arc::new(self.registration),
            users: Arc::new(self.users),
            login: Arc::new(self.login),
            authenticator: Arc::new(self.authenticator),
        }
    }
}
