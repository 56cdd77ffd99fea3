use crate::application::dto::posts::PostPageDto;
use crate::application::pagination::Pagination;
use crate::application::ports::post_repository::PostRepository;

pub struct ListPosts<'a, R: PostRepository + ?Sized> {
    pub repo: &'a R,
}

impl<'a, R: PostRepository + ?Sized> ListPosts<'a, R> {
    /// `Ok(None)` when the requested page holds no posts.
    pub async fn execute(&self, page: Pagination) -> anyhow::Result<Option<PostPageDto>> {
        let items = self.repo.list_posts(page.limit(), page.offset()).await?;
        if items.is_empty() {
            return Ok(None);
        }
        let total = self.repo.count_posts().await?;
        Ok(Some(PostPageDto {
            items,
            total,
            page_size: page.page_size,
            page_number: page.page_number,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::{InMemoryPosts, sample_post};

    #[tokio::test]
    async fn pages_newest_first() {
        let repo = InMemoryPosts::default();
        for day in 1..=5 {
            repo.insert_if_absent(&sample_post(&format!("https://a.dev/{day}"), day))
                .await
                .unwrap();
        }
        let uc = ListPosts { repo: &repo };
        let page = uc
            .execute(Pagination::new(2, 1).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(page.total, 5);
        assert_eq!(page.items[0].link, "https://a.dev/5");
        assert_eq!(page.items[1].link, "https://a.dev/4");
        let last = uc
            .execute(Pagination::new(2, 3).unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(last.items.len(), 1);
    }

    #[tokio::test]
    async fn empty_page_is_none() {
        let repo = InMemoryPosts::default();
        let uc = ListPosts { repo: &repo };
        assert!(uc.execute(Pagination::default()).await.unwrap().is_none());
    }
}
