use alloy::primitives::{Address, B256, U256, address, keccak256};
use fastnum::udec64;
use swap_sdk::{
    order::{AnyOrder, CancelOrderRequest, CrossChainOrder, LimitOrder, LockOrder},
    sign::{OrderSigner, TypedDataSigner, normalize_signature},
    testing::{self, ParitySigner},
    types::Side,
};

fn cross_chain_order(sender: Address) -> CrossChainOrder {
    let limit_order = LimitOrder::builder()
        .sender(sender)
        .matcher(address!("0x3333333333333333333333333333333333333333"))
        .base_asset(address!("0x2222222222222222222222222222222222222222"))
        .quote_asset(address!("0x4444444444444444444444444444444444444444"))
        .matcher_fee_asset(address!("0x4444444444444444444444444444444444444444"))
        .amount(udec64!(2))
        .price(udec64!(310.5))
        .matcher_fee(udec64!(0.15))
        .nonce(1_700_000_000_000)
        .expiration(1_702_592_000_000)
        .side(Side::Sell)
        .build()
        .unwrap();
    CrossChainOrder::builder()
        .limit_order(limit_order)
        .target_chain_id(testing::TARGET_CHAIN_ID)
        .secret_hash(keccak256("secret"))
        .lock_order_expiration(1_700_086_400_000)
        .build()
        .unwrap()
}

/// Software and hardware-wallet style signatures over the same order
/// normalize to identical bytes recovering to the same signer.
#[tokio::test]
async fn test_signer_conventions_normalize_identically() {
    let signer = testing::local_signer();
    let order = cross_chain_order(signer.address());

    let software = OrderSigner::new(testing::chains(), &signer)
        .sign(order)
        .await
        .unwrap();
    let hardware = OrderSigner::new(testing::chains(), ParitySigner::new(&signer))
        .sign(order)
        .await
        .unwrap();

    assert_eq!(software, hardware);
    assert_eq!(software.order(), &order);

    let domain = testing::chains().domain(testing::TARGET_CHAIN_ID).unwrap();
    assert_eq!(software.recover_signer(&domain).unwrap(), signer.address());
    assert_eq!(
        normalize_signature(software.signature().as_bytes()).unwrap(),
        *software.signature()
    );
}

/// Cancelling an order refers to it by its canonical hash.
#[tokio::test]
async fn test_cancel_by_order_hash() {
    let signer = testing::local_signer();
    let lock = LockOrder::builder()
        .sender(signer.address())
        .expiration(1_700_000_000_000)
        .asset(address!("0x2222222222222222222222222222222222222222"))
        .amount_units(U256::from(150_000_000))
        .target_chain_id(testing::TARGET_CHAIN_ID)
        .secret_hash(keccak256("secret"))
        .build()
        .unwrap();

    let cancel =
        CancelOrderRequest::new(signer.address(), lock.hash(), testing::TARGET_CHAIN_ID).unwrap();
    let signed = OrderSigner::new(testing::chains(), &signer)
        .sign(cancel)
        .await
        .unwrap();

    assert_eq!(signed.order().order_id(), lock.hash());
    let packed = AnyOrder::from(cancel).encode_packed();
    assert_eq!(packed[0], 0x05);
    assert_eq!(AnyOrder::decode_packed(&packed).unwrap(), AnyOrder::Cancel(cancel));
}

#[test]
fn test_orders_are_not_mutated_by_signing() {
    let signer = testing::local_signer();
    let order = cross_chain_order(signer.address());
    let hash = order.hash();

    let signed = tokio_test::block_on(OrderSigner::new(testing::chains(), &signer).sign(order))
        .unwrap();
    let (order, signature) = signed.into_parts();

    assert_eq!(order.hash(), hash);
    assert_ne!(signature.r(), B256::ZERO);
}
