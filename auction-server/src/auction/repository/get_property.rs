use {
    super::{
        Database,
        Repository,
    },
    crate::{
        api::RestError,
        auction::entities,
        kernel::entities::PropertyId,
    },
};

impl<D: Database> Repository<D> {
    pub async fn get_property(
        &self,
        property_id: PropertyId,
    ) -> Result<entities::Property, RestError> {
        let property = self.db.get_property(property_id).await?;
        Ok(property.get_entity())
    }
}
