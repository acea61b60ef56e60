/// Generates `get_<one>` and `list_<many>` read methods for a client field
/// holding a `ResourceClient`. The error type must implement
/// `From<FrameworkError>`.
macro_rules! impl_client_methods {
    ($client_name:ident, $field:ident: $entity:ty, $error:ty, $one:ident, $many:ident) => {
        paste::paste! {
            impl $client_name {
                #[tracing::instrument(skip(self))]
                pub async fn [<get_ $one>](&self, id: String) -> Result<Option<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.$field.get(id).await.map_err(<$error>::from)
                }

                #[tracing::instrument(skip(self))]
                pub async fn [<list_ $many>](&self) -> Result<Vec<$entity>, $error> {
                    tracing::debug!("Sending request");
                    self.$field.list().await.map_err(<$error>::from)
                }
            }
        }
    };
}
