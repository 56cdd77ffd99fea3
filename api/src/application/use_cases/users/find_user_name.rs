use crate::application::dto::users::UserNameAvailabilityDto;
use crate::application::ports::user_repository::UserRepository;

pub struct FindUserName<'a, R: UserRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: UserRepository + ?Sized> FindUserName<'a, R> {
    pub async fn execute(&self, user_name: &str) -> anyhow::Result<UserNameAvailabilityDto> {
        let user_name = user_name.trim();
        let exists = self.repo.user_name_exists(user_name).await?;
        Ok(UserNameAvailabilityDto {
            user_name: user_name.to_string(),
            exists,
        })
    }
}
