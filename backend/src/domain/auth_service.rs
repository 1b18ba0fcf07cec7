//! Login and bearer-token authentication service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::domain::ports::{
    LoginService, PasswordHasher, TokenAuthenticator, TokenError, TokenService, UserRepository,
};
use crate::domain::user_service::{map_hash_error, map_user_repository_error};
use crate::domain::{Error, LoginCredentials, LoginSuccess, PasswordHash, User};

const INVALID_CREDENTIALS: &str = "invalid username or password";
const INVALID_TOKEN: &str = "token missing or invalid";

fn map_token_error(error: TokenError) -> Error {
    match error {
        TokenError::Expired => Error::unauthorized("token expired"),
        TokenError::Invalid { message } => {
            debug!(%message, "rejected bearer token");
            Error::unauthorized(INVALID_TOKEN)
        }
        TokenError::Signing { message } => {
            Error::internal(format!("token signing failed: {message}"))
        }
    }
}

/// Service implementing [`LoginService`] and [`TokenAuthenticator`].
#[derive(Clone)]
pub struct AuthService<R, H, T> {
    user_repo: Arc<R>,
    hasher: Arc<H>,
    tokens: Arc<T>,
}

impl<R, H, T> AuthService<R, H, T> {
    pub fn new(user_repo: Arc<R>, hasher: Arc<H>, tokens: Arc<T>) -> Self {
        Self {
            user_repo,
            hasher,
            tokens,
        }
    }
}

impl<R, H, T> AuthService<R, H, T>
where
    H: PasswordHasher + 'static,
{
    async fn password_matches(&self, password: &str, hash: PasswordHash) -> Result<bool, Error> {
        let hasher = Arc::clone(&self.hasher);
        let password = Zeroizing::new(password.to_owned());
        tokio::task::spawn_blocking(move || hasher.verify(&password, &hash))
            .await
            .map_err(|err| Error::internal(format!("password check task failed: {err}")))?
            .map_err(map_hash_error)
    }
}

#[async_trait]
impl<R, H, T> LoginService for AuthService<R, H, T>
where
    R: UserRepository,
    H: PasswordHasher + 'static,
    T: TokenService,
{
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginSuccess, Error> {
        let Some(stored) = self
            .user_repo
            .find_credentials(credentials.username())
            .await
            .map_err(map_user_repository_error)?
        else {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        };

        if !self
            .password_matches(credentials.password(), stored.password_hash)
            .await?
        {
            return Err(Error::unauthorized(INVALID_CREDENTIALS));
        }

        let token = self.tokens.issue(&stored.user).map_err(map_token_error)?;
        info!(user_id = %stored.user.id(), "user logged in");
        Ok(LoginSuccess {
            token,
            user: stored.user,
        })
    }
}

#[async_trait]
impl<R, H, T> TokenAuthenticator for AuthService<R, H, T>
where
    R: UserRepository,
    H: Send + Sync,
    T: TokenService,
{
    async fn authenticate(&self, token: &str) -> Result<User, Error> {
        let claims = self.tokens.verify(token).map_err(map_token_error)?;
        self.user_repo
            .find_by_id(&claims.user_id)
            .await
            .map_err(map_user_repository_error)?
            .ok_or_else(|| Error::unauthorized(INVALID_TOKEN))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockPasswordHasher, MockTokenService, MockUserRepository};
    use crate::domain::{AuthToken, ErrorCode, StoredCredentials, TokenClaims, UserId, Username};
    use rstest::{fixture, rstest};

    #[fixture]
    fn root() -> User {
        User::new(
            UserId::random(),
            Username::new("root").expect("valid username"),
            Some("Superuser".to_owned()),
            Vec::new(),
        )
    }

    fn repo_with(user: Option<User>) -> MockUserRepository {
        let mut repo = MockUserRepository::new();
        repo.expect_find_credentials().returning(move |_| {
            Ok(user.clone().map(|user| StoredCredentials {
                user,
                password_hash: PasswordHash::new("$2b$stored"),
            }))
        });
        repo
    }

    fn hasher_accepting(expected: &'static str) -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_verify()
            .returning(move |password, _| Ok(password == expected));
        hasher
    }

    fn token_issuer() -> MockTokenService {
        let mut tokens = MockTokenService::new();
        tokens
            .expect_issue()
            .returning(|_| Ok(AuthToken::new("signed.jwt.value")));
        tokens
    }

    fn creds(password: &str) -> LoginCredentials {
        LoginCredentials::try_from_parts("root", password).expect("valid credentials")
    }

    #[rstest]
    #[tokio::test]
    async fn login_issues_token_for_matching_password(root: User) {
        let service = AuthService::new(
            Arc::new(repo_with(Some(root.clone()))),
            Arc::new(hasher_accepting("sekret")),
            Arc::new(token_issuer()),
        );

        let success = service.login(&creds("sekret")).await.expect("login succeeds");

        assert_eq!(success.token.as_str(), "signed.jwt.value");
        assert_eq!(success.user, root);
    }

    #[rstest]
    #[case(true, "wrong")]
    #[case(false, "sekret")]
    #[tokio::test]
    async fn login_rejects_bad_credentials_alike(
        root: User,
        #[case] user_exists: bool,
        #[case] password: &str,
    ) {
        let mut tokens = MockTokenService::new();
        tokens.expect_issue().times(0);
        let service = AuthService::new(
            Arc::new(repo_with(user_exists.then_some(root))),
            Arc::new(hasher_accepting("sekret")),
            Arc::new(tokens),
        );

        let error = service.login(&creds(password)).await.expect_err("rejected");

        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), INVALID_CREDENTIALS);
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_resolves_token_owner(root: User) {
        let user_id = *root.id();
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().returning(move |_| {
            Ok(TokenClaims {
                user_id,
                username: "root".to_owned(),
            })
        });
        let mut repo = MockUserRepository::new();
        let found = root.clone();
        repo.expect_find_by_id()
            .withf(move |id| *id == user_id)
            .returning(move |_| Ok(Some(found.clone())));

        let service = AuthService::new(
            Arc::new(repo),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(tokens),
        );

        let user = service.authenticate("signed").await.expect("authenticated");
        assert_eq!(user, root);
    }

    #[rstest]
    #[case(TokenError::expired(), "token expired")]
    #[case(TokenError::invalid("bad signature"), INVALID_TOKEN)]
    #[tokio::test]
    async fn authenticate_rejects_unverifiable_tokens(
        #[case] failure: TokenError,
        #[case] message: &str,
    ) {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().return_once(move |_| Err(failure));
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().times(0);

        let service = AuthService::new(
            Arc::new(repo),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(tokens),
        );

        let error = service.authenticate("garbage").await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
        assert_eq!(error.message(), message);
    }

    #[rstest]
    #[tokio::test]
    async fn authenticate_rejects_tokens_of_removed_users() {
        let mut tokens = MockTokenService::new();
        tokens.expect_verify().returning(|_| {
            Ok(TokenClaims {
                user_id: UserId::random(),
                username: "ghost".to_owned(),
            })
        });
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_id().returning(|_| Ok(None));

        let service = AuthService::new(
            Arc::new(repo),
            Arc::new(MockPasswordHasher::new()),
            Arc::new(tokens),
        );

        let error = service.authenticate("orphan").await.expect_err("rejected");
        assert_eq!(error.code(), ErrorCode::Unauthorized);
    }
}
