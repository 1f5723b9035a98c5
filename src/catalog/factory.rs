use std::sync::Arc;
use crate::books::factory;
use crate::catalog::domain::CatalogService;
use crate::catalog::domain::service::CatalogServiceImpl;
use crate::utils::sqlite::DbConnectionFactory;

pub(crate) fn create_catalog_service(connection_factory: Arc<dyn DbConnectionFactory>) -> Box<dyn CatalogService> {
    let book_repo = factory::create_book_repository(connection_factory);
    Box::new(CatalogServiceImpl::new(book_repo))
}
