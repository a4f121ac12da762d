//! User service - profile management and the admin user panel.

use async_trait::async_trait;
use std::sync::Arc;

use crate::config::LIST_PAGE_SIZE;
use crate::domain::{Password, User};
use crate::errors::{AppError, AppResult, OptionExt};
use crate::infra::repositories::ProfileChanges;
use crate::infra::{ProfileImageStore, UnitOfWork};
use crate::types::{Outcome, Paginated};

/// User service trait for dependency injection.
#[async_trait]
pub trait UserService: Send + Sync {
    async fn get_user(&self, id: i64) -> AppResult<User>;

    /// Update profile fields. Keyed by arbitrary id so the admin panel
    /// reuses it; ownership is checked at the handler.
    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User>;

    /// Replace the profile picture with an uploaded image.
    async fn update_profile_picture(&self, id: i64, bytes: Vec<u8>) -> AppResult<User>;

    /// Change password after verifying the old one. Soft outcome: a wrong
    /// old password is a notice, not an HTTP failure.
    async fn change_password(&self, id: i64, old: String, new: String) -> AppResult<Outcome>;

    /// Admin listing, newest first.
    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>>;

    /// Admin hard delete; already-gone rows are a benign outcome.
    async fn delete_user(&self, id: i64) -> AppResult<Outcome>;
}

/// Concrete implementation of UserService using Unit of Work.
pub struct UserManager<U: UnitOfWork> {
    uow: Arc<U>,
    images: ProfileImageStore,
}

impl<U: UnitOfWork> UserManager<U> {
    pub fn new(uow: Arc<U>, images: ProfileImageStore) -> Self {
        Self { uow, images }
    }
}

#[async_trait]
impl<U: UnitOfWork> UserService for UserManager<U> {
    async fn get_user(&self, id: i64) -> AppResult<User> {
        self.uow
            .users()
            .find_by_id(id)
            .await?
            .ok_or_not_found()
    }

    async fn update_profile(&self, id: i64, changes: ProfileChanges) -> AppResult<User> {
        if self.uow.users().email_taken(&changes.email, Some(id)).await? {
            return Err(AppError::field("email", "Email is already registered"));
        }

        self.uow.users().update_profile(id, changes).await
    }

    async fn update_profile_picture(&self, id: i64, bytes: Vec<u8>) -> AppResult<User> {
        // Write-new first, then point the row at it, then drop the old
        // pair. A failed row update must not leave orphan files behind.
        let filename = self.images.save(id, bytes).await?;

        let previous = match self.uow.users().update_image(id, filename.clone()).await {
            Ok(previous) => previous,
            Err(e) => {
                self.images.remove(&filename).await;
                return Err(e);
            }
        };

        if let Some(old) = previous {
            self.images.remove(&old).await;
        }

        self.get_user(id).await
    }

    async fn change_password(&self, id: i64, old: String, new: String) -> AppResult<Outcome> {
        let user = self.get_user(id).await?;

        if !Password::from_hash(user.password_hash).verify(&old) {
            return Ok(Outcome::forbidden("Old password is incorrect."));
        }

        let password_hash = match Password::new(&new) {
            Ok(password) => password.into_string(),
            Err(AppError::Validation(errors)) => return Ok(Outcome::Invalid(errors)),
            Err(e) => return Err(e),
        };

        self.uow.users().update_password(id, password_hash).await?;
        Ok(Outcome::done("Password changed successfully."))
    }

    async fn list_users(&self, page: u64) -> AppResult<Paginated<User>> {
        let (users, total) = self.uow.users().list(page).await?;
        Ok(Paginated::new(users, page, LIST_PAGE_SIZE, total))
    }

    async fn delete_user(&self, id: i64) -> AppResult<Outcome> {
        if self.uow.users().delete(id).await? {
            Ok(Outcome::done("User deleted successfully."))
        } else {
            Ok(Outcome::not_found("Either user deleted or not found."))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_support::{user_fixture, TestUow};

    fn manager(uow: TestUow, dir: &std::path::Path) -> UserManager<TestUow> {
        UserManager::new(Arc::new(uow), ProfileImageStore::new(dir))
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::RgbImage::from_pixel(4, 4, image::Rgb([1, 2, 3]));
        let mut out = std::io::Cursor::new(Vec::new());
        image::DynamicImage::ImageRgb8(img)
            .write_to(&mut out, image::ImageFormat::Png)
            .unwrap();
        out.into_inner()
    }

    #[tokio::test]
    async fn profile_update_rejects_someone_elses_email() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_email_taken()
            .withf(|email, exclude| email == "taken@example.com" && *exclude == Some(5))
            .returning(|_, _| Ok(true));

        let changes = ProfileChanges {
            name: "Jane Doe".to_string(),
            email: "taken@example.com".to_string(),
            mobile: None,
            designation: None,
        };

        let err = manager(uow, dir.path())
            .update_profile(5, changes)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn change_password_with_wrong_old_password_is_a_soft_forbidden() {
        let dir = tempfile::tempdir().unwrap();
        let hash = Password::new("rightpw").unwrap().into_string();
        let user = user_fixture(5, "jane@example.com", hash);

        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        uow.users_mock().expect_update_password().never();

        let outcome = manager(uow, dir.path())
            .change_password(5, "wrongpw".into(), "newpass1".into())
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Forbidden(_)));
    }

    #[tokio::test]
    async fn change_password_happy_path_stores_a_new_hash() {
        let dir = tempfile::tempdir().unwrap();
        let hash = Password::new("rightpw").unwrap().into_string();
        let user = user_fixture(5, "jane@example.com", hash.clone());

        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));
        uow.users_mock()
            .expect_update_password()
            .withf(move |id, new_hash| *id == 5 && new_hash != &hash)
            .returning(|_, _| Ok(()));

        let outcome = manager(uow, dir.path())
            .change_password(5, "rightpw".into(), "newpass1".into())
            .await
            .unwrap();
        assert!(outcome.is_done());
    }

    #[tokio::test]
    async fn too_short_new_password_is_a_soft_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let hash = Password::new("rightpw").unwrap().into_string();
        let user = user_fixture(5, "jane@example.com", hash);

        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_find_by_id()
            .returning(move |_| Ok(Some(user.clone())));

        let outcome = manager(uow, dir.path())
            .change_password(5, "rightpw".into(), "abc".into())
            .await
            .unwrap();
        assert!(matches!(outcome, Outcome::Invalid(_)));
    }

    #[tokio::test]
    async fn picture_update_cleans_up_files_when_the_row_update_fails() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_update_image()
            .returning(|_, _| Err(AppError::NotFound));

        let err = manager(uow, dir.path())
            .update_profile_picture(9, png_bytes())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound));

        // Neither the original nor the thumbnail may survive
        let leftovers: Vec<_> = walk_files(dir.path());
        assert!(leftovers.is_empty(), "leftover files: {:?}", leftovers);
    }

    #[tokio::test]
    async fn picture_update_removes_the_previous_pair() {
        let dir = tempfile::tempdir().unwrap();
        let store = ProfileImageStore::new(dir.path());
        // Different user id so the old pair cannot collide with the new
        // upload's timestamped filename.
        let old_name = store.save(8, png_bytes()).await.unwrap();

        let old_for_mock = old_name.clone();
        let mut uow = TestUow::new();
        uow.users_mock()
            .expect_update_image()
            .returning(move |_, _| Ok(Some(old_for_mock.clone())));
        uow.users_mock().expect_find_by_id().returning(|id| {
            Ok(Some(user_fixture(id, "jane@example.com", "h".into())))
        });

        manager(uow, dir.path())
            .update_profile_picture(9, png_bytes())
            .await
            .unwrap();

        assert!(!dir.path().join(&old_name).exists());
    }

    #[tokio::test]
    async fn deleting_a_missing_user_is_benign() {
        let dir = tempfile::tempdir().unwrap();
        let mut uow = TestUow::new();
        uow.users_mock().expect_delete().returning(|_| Ok(false));

        let outcome = manager(uow, dir.path()).delete_user(99).await.unwrap();
        assert!(matches!(outcome, Outcome::NotFound(_)));
    }

    fn walk_files(dir: &std::path::Path) -> Vec<std::path::PathBuf> {
        let mut files = Vec::new();
        let mut stack = vec![dir.to_path_buf()];
        while let Some(current) = stack.pop() {
            if let Ok(entries) = std::fs::read_dir(&current) {
                for entry in entries.flatten() {
                    let path = entry.path();
                    if path.is_dir() {
                        stack.push(path);
                    } else {
                        files.push(path);
                    }
                }
            }
        }
        files
    }
}
