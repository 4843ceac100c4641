use foodgram_domain::shopping_list::ShoppingList;

use crate::domain::repository::ShoppingListRepository;
use crate::error::ApiError;

pub struct DownloadShoppingListUseCase<L: ShoppingListRepository> {
    pub lines: L,
}

impl<L: ShoppingListRepository> DownloadShoppingListUseCase<L> {
    /// Shopping list for the user's cart, one line per recipe line. An empty cart is an error.
    pub async fn execute(&self, user_id: i32) -> Result<ShoppingList, ApiError> {
        let lines = self.lines.cart_lines(user_id).await?;
        let list = ShoppingList::aggregate(lines);
        if list.is_empty() {
            return Err(ApiError::EmptyShoppingCart);
        }
        Ok(list)
    }
}
