use payments_client::models::Language;

/// Keys or whole languages may be missing from a table; lookups fall back
/// to English before giving up.
pub const FALLBACK: Language = Language::En;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    BtcPrice,
    PriceUnavailable,
    FillAllFields,
    AmountBounds,
    ProcessingError,
    OriginalAmount,
    Fee,
    NetAmount,
    BtcReceived,
    TotalConverted,
    TotalPayments,
    ActiveSubscriptions,
    NoPaymentsFound,
    NoSubscriptionsFound,
    NoConversionsFound,
    DropshipSuccess,
    UpsellSuccess,
    OptimizedFee,
    Savings,
    KeysUsed,
    TotalSaved,
    Profit,
}

pub fn t(language: Language, key: Key) -> &'static str {
    lookup(language, key)
        .or_else(|| lookup(FALLBACK, key))
        .unwrap_or("")
}

fn lookup(language: Language, key: Key) -> Option<&'static str> {
    use Key::*;
    use Language::*;

    let text = match (language, key) {
        (En, BtcPrice) => "Bitcoin price",
        (En, PriceUnavailable) => "price unavailable",
        (En, FillAllFields) => "fill all required fields",
        (En, AmountBounds) => "amount must be between 10 and 10000",
        (En, ProcessingError) => "processing error",
        (En, OriginalAmount) => "Original amount",
        (En, Fee) => "Fee",
        (En, NetAmount) => "Net amount",
        (En, BtcReceived) => "Bitcoin received",
        (En, TotalConverted) => "Total converted",
        (En, TotalPayments) => "Payments processed",
        (En, ActiveSubscriptions) => "Active subscriptions",
        (En, NoPaymentsFound) => "No payments found",
        (En, NoSubscriptionsFound) => "No subscriptions found",
        (En, NoConversionsFound) => "No conversions found",
        (En, DropshipSuccess) => "Product purchased and converted to",
        (En, UpsellSuccess) => "Upsell sent successfully!",
        (En, OptimizedFee) => "Optimized fee",
        (En, Savings) => "Savings",
        (En, KeysUsed) => "Keys used",
        (En, TotalSaved) => "Total saved",
        (En, Profit) => "profit",

        (Pt, BtcPrice) => "Preço Bitcoin",
        (Pt, PriceUnavailable) => "preço indisponível",
        (Pt, FillAllFields) => "Preencha todos os campos obrigatórios",
        (Pt, AmountBounds) => "Valor deve estar entre 10 e 10000",
        (Pt, ProcessingError) => "Erro ao processar",
        (Pt, OriginalAmount) => "Valor original",
        (Pt, Fee) => "Taxa",
        (Pt, NetAmount) => "Valor líquido",
        (Pt, BtcReceived) => "Bitcoin recebido",
        (Pt, TotalConverted) => "Total convertido",
        (Pt, TotalPayments) => "Pagamentos processados",
        (Pt, ActiveSubscriptions) => "Assinaturas ativas",
        (Pt, NoPaymentsFound) => "Nenhum pagamento encontrado",
        (Pt, NoSubscriptionsFound) => "Nenhuma assinatura encontrada",
        (Pt, NoConversionsFound) => "Nenhuma conversão encontrada",
        (Pt, DropshipSuccess) => "Produto comprado e convertido para",
        (Pt, UpsellSuccess) => "Upsell enviado com sucesso!",
        (Pt, OptimizedFee) => "Taxa otimizada",
        (Pt, Savings) => "Economia",
        (Pt, KeysUsed) => "Chaves usadas",
        (Pt, TotalSaved) => "Total economizado",
        (Pt, Profit) => "lucro",

        // The Spanish table only ever covered the payment form; dashboard
        // and promo strings fall back to English.
        (Es, BtcPrice) => "Precio Bitcoin",
        (Es, PriceUnavailable) => "precio no disponible",
        (Es, FillAllFields) => "Complete todos los campos obligatorios",
        (Es, AmountBounds) => "El monto debe estar entre 10 y 10000",
        (Es, ProcessingError) => "Error al procesar",
        (Es, OriginalAmount) => "Monto original",
        (Es, Fee) => "Tarifa",
        (Es, NetAmount) => "Monto neto",
        (Es, BtcReceived) => "Bitcoin recibido",

        _ => return None,
    };
    Some(text)
}
